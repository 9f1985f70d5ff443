//! The trie core: node graph construction, lookup, and the ordered/XOR
//! traversal primitives every view and iterator is built from (spec §4.2-§4.10).
//!
//! Nodes never alias through `Box`/`Rc`; the graph is cyclic by construction
//! (an "uplink" slot self-loops to the node that owns it) and lives in a
//! single [`Arena`] addressed by stable `u32` index.

use std::cmp::Ordering;

use log::{info, trace};

use crate::error::{PatriciaError, Result};
use crate::key::{self, KeyAnalyzer};
use crate::node::{Arena, ROOT};

/// A single stored key/value pair, handed to cursors and returned from
/// cursor-driven operations. Owns its fields so a [`Decision::RemoveAndExit`]
/// result can outlive the node it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// The core PATRICIA trie. Generic over a key type `K`, value type `V`, and
/// a [`KeyAnalyzer`] capability `A` that answers every bit-level question.
pub struct PatriciaTrie<K, V, A> {
    pub(crate) arena: Arena<K, V>,
    pub(crate) analyzer: A,
    pub(crate) size: usize,
    pub(crate) mod_count: u64,
}

impl<K, V, A> PatriciaTrie<K, V, A>
where
    A: KeyAnalyzer<K>,
{
    pub fn new(analyzer: A) -> Self {
        PatriciaTrie {
            arena: Arena::new(),
            analyzer,
            size: 0,
            mod_count: 0,
        }
    }

    pub fn with_capacity(analyzer: A, capacity: usize) -> Self {
        PatriciaTrie {
            arena: Arena::with_capacity(capacity),
            analyzer,
            size: 0,
            mod_count: 0,
        }
    }

    pub fn comparator(&self) -> &A {
        &self.analyzer
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.size = 0;
        self.mod_count += 1;
    }

    pub(crate) fn mod_count(&self) -> u64 {
        self.mod_count
    }

    #[inline]
    fn is_downlink_edge(&self, parent: u32, child: u32) -> bool {
        self.arena.get(parent).is_downlink(self.arena.get(child).bit_index)
    }

    pub(crate) fn entry_at(&self, id: u32) -> Entry<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let node = self.arena.get(id);
        Entry {
            key: node.key.clone().expect("entry_at called on an empty node"),
            value: node.value.clone().expect("entry_at called on an empty node"),
        }
    }

    pub(crate) fn node_key(&self, id: u32) -> &K {
        self.arena.get(id).key.as_ref().expect("node_key called on an empty node")
    }

    pub(crate) fn node_value(&self, id: u32) -> &V {
        self.arena.get(id).value.as_ref().expect("node_value called on an empty node")
    }

    // --- lookup -------------------------------------------------------

    /// Descend as far as the key's own bits direct us, stopping at the
    /// first uplink (spec §4.2 step 2 / §4.3). Returns [`ROOT`] itself when
    /// the trie holds no non-root entries yet.
    pub(crate) fn get_nearest_entry(&self, key: &K) -> u32 {
        let len = self.analyzer.length_in_bits(key);
        let mut current = ROOT;
        let mut child = self.arena.get(ROOT).left;
        while self.is_downlink_edge(current, child) {
            current = child;
            let cur = self.arena.get(current);
            child = if self.analyzer.is_bit_set(key, cur.bit_index, len) {
                cur.right
            } else {
                cur.left
            };
        }
        child
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        trace!("get: descending for key");
        let len = self.analyzer.length_in_bits(key);
        if len == 0 {
            return self.arena.get(ROOT).value.as_ref();
        }
        let found = self.get_nearest_entry(key);
        let node = self.arena.get(found);
        match &node.key {
            Some(k) if self.analyzer.compare(key, k) == Ordering::Equal => node.value.as_ref(),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        if let Some(v) = self.arena.get(ROOT).value.as_ref() {
            if v == value {
                return true;
            }
        }
        let mut cur = match self.first_node() {
            Some(n) => n,
            None => return false,
        };
        loop {
            if cur != ROOT && self.arena.get(cur).value.as_ref() == Some(value) {
                return true;
            }
            match self.next_node(cur, None) {
                Some(n) => cur = n,
                None => return false,
            }
        }
    }

    // --- insert ---------------------------------------------------------

    fn store_at_root(&mut self, key: K, value: V) -> Option<V> {
        info!("storing a zero/all-zero-bit key at the trie root");
        let root = self.arena.get_mut(ROOT);
        let old = if root.key.is_some() {
            root.value.replace(value)
        } else {
            root.key = Some(key);
            root.value = Some(value);
            self.size += 1;
            None
        };
        self.mod_count += 1;
        old
    }

    /// The very first non-root key ever inserted: no existing node to
    /// splice against. Becomes a self-looping singleton hanging off
    /// `root.left`; its `bit_index` is a placeholder and is never
    /// dereferenced for a value, only compared, so any non-negative value
    /// is correct (the first splice through it picks its own real index).
    fn bootstrap(&mut self, key: K, value: V) {
        let n = self.arena.alloc(key, value, 0);
        {
            let node = self.arena.get_mut(n);
            node.left = n;
            node.right = n;
            node.parent = Some(ROOT);
            node.predecessor = Some(n);
        }
        self.arena.get_mut(ROOT).left = n;
    }

    /// Splice a new node for `(key, value)` at divergence bit `b` (spec
    /// §4.2 step 4).
    fn splice(&mut self, key: K, value: V, b: i32) {
        let len = self.analyzer.length_in_bits(&key);
        let mut current = ROOT;
        let mut child = self.arena.get(ROOT).left;
        let mut took_right = false;
        loop {
            let child_bi = self.arena.get(child).bit_index;
            if child_bi >= b || !self.is_downlink_edge(current, child) {
                break;
            }
            current = child;
            let cur = self.arena.get(current);
            took_right = self.analyzer.is_bit_set(&key, cur.bit_index, len);
            child = if took_right { cur.right } else { cur.left };
        }

        let child_is_downlink = self.is_downlink_edge(current, child);
        let current_selects_right = current != ROOT && took_right;
        let own_bit = self.analyzer.is_bit_set(&key, b, len);

        let n = self.arena.alloc(key, value, b);
        {
            let node = self.arena.get_mut(n);
            node.parent = Some(current);
            node.predecessor = Some(n);
            if own_bit {
                node.right = n;
                node.left = child;
            } else {
                node.left = n;
                node.right = child;
            }
        }
        if child_is_downlink {
            self.arena.get_mut(child).parent = Some(n);
        } else {
            self.arena.get_mut(child).predecessor = Some(n);
        }
        if current_selects_right {
            self.arena.get_mut(current).right = n;
        } else {
            self.arena.get_mut(current).left = n;
        }
        info!("spliced new node at bit {b}");
    }

    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let len = self.analyzer.length_in_bits(&key);
        if len == 0 {
            return self.store_at_root(key, value);
        }
        let found = self.get_nearest_entry(&key);
        let has_key = self.arena.get(found).key.is_some();
        if has_key {
            let equal = {
                let fkey = self.arena.get(found).key.as_ref().unwrap();
                self.analyzer.compare(&key, fkey) == Ordering::Equal
            };
            if equal {
                self.mod_count += 1;
                return self.arena.get_mut(found).value.replace(value);
            }
            let b = {
                let fkey = self.arena.get(found).key.as_ref().unwrap();
                key::whole_key_bit_index(&self.analyzer, &key, fkey)
            };
            if key::is_valid_bit_index(b) {
                self.splice(key, value, b);
                self.size += 1;
                self.mod_count += 1;
                None
            } else if b == key::NULL_BIT_KEY {
                self.store_at_root(key, value)
            } else {
                debug_assert!(
                    b == key::EQUAL_BIT_KEY,
                    "bit_index returned a value outside its documented range"
                );
                // bit_index disagrees with compare(); trust compare() and
                // treat this defensively as the equality case already
                // checked above. Unreachable for a conforming analyzer.
                self.mod_count += 1;
                self.arena.get_mut(found).value.replace(value)
            }
        } else {
            self.bootstrap(key, value);
            self.size += 1;
            self.mod_count += 1;
            None
        }
    }

    // --- delete -----------------------------------------------------

    fn remove_root(&mut self) -> Option<V> {
        let root = self.arena.get_mut(ROOT);
        let had_key = root.key.is_some();
        root.key = None;
        let old = root.value.take();
        if had_key {
            self.size -= 1;
            self.mod_count += 1;
        }
        old
    }

    /// External deletion: `h` has a self-loop on one side (spec §4.4).
    fn delete_external(&mut self, h: u32) {
        let (p, c) = {
            let node = self.arena.get(h);
            let p = node.parent.expect("non-root node always has a parent");
            let c = if node.left == h { node.right } else { node.left };
            (p, c)
        };
        if self.arena.get(p).left == h {
            self.arena.get_mut(p).left = c;
        } else {
            self.arena.get_mut(p).right = c;
        }
        if self.is_downlink_edge(p, c) {
            self.arena.get_mut(c).parent = Some(p);
        } else {
            self.arena.get_mut(c).predecessor = Some(p);
        }
    }

    /// Internal deletion: `h`'s predecessor is promoted into `h`'s slot
    /// (spec §4.4).
    fn delete_internal(&mut self, h: u32) {
        let p = self.arena.get(h).predecessor.expect("internal node has a predecessor");
        let p_parent = self.arena.get(p).parent.expect("predecessor has a parent");
        let p_self_looping = {
            let pn = self.arena.get(p);
            pn.left == p || pn.right == p
        };
        let p_other_child = {
            let pn = self.arena.get(p);
            if pn.left == p { pn.right } else { pn.left }
        };

        // Step 1: p takes over h's bit_index.
        self.arena.get_mut(p).bit_index = self.arena.get(h).bit_index;

        // Step 2: fix p's old neighborhood.
        if self.arena.get(p_parent).left == p {
            self.arena.get_mut(p_parent).left = p_other_child;
        } else {
            self.arena.get_mut(p_parent).right = p_other_child;
        }
        if self.is_downlink_edge(p_parent, p_other_child) {
            self.arena.get_mut(p_other_child).parent = Some(p_parent);
        }
        if p_self_looping && p_parent != h {
            self.arena.get_mut(p).predecessor = Some(p_parent);
        }

        // Step 3: fix h's old neighborhood; re-parent h's children to p.
        let (h_parent, h_left, h_right) = {
            let hn = self.arena.get(h);
            (hn.parent.expect("non-root node has a parent"), hn.left, hn.right)
        };
        if self.arena.get(h_left).parent == Some(h) {
            self.arena.get_mut(h_left).parent = Some(p);
        }
        if self.arena.get(h_right).parent == Some(h) {
            self.arena.get_mut(h_right).parent = Some(p);
        }
        if self.arena.get(h_parent).left == h {
            self.arena.get_mut(h_parent).left = p;
        } else {
            self.arena.get_mut(h_parent).right = p;
        }

        // Step 4: copy h's links into p.
        {
            let h_node_parent = h_parent;
            let p_node = self.arena.get_mut(p);
            p_node.parent = Some(h_node_parent);
            p_node.left = h_left;
            p_node.right = h_right;
        }

        // Step 5: any of p's new children that uplink to p get predecessor fixed.
        if !self.is_downlink_edge(p, h_left) {
            self.arena.get_mut(h_left).predecessor = Some(p);
        }
        if !self.is_downlink_edge(p, h_right) {
            self.arena.get_mut(h_right).predecessor = Some(p);
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let len = self.analyzer.length_in_bits(key);
        if len == 0 {
            return self.remove_root();
        }
        let found = self.get_nearest_entry(key);
        if found == ROOT {
            return None;
        }
        let matches = {
            let node = self.arena.get(found);
            match &node.key {
                Some(k) => self.analyzer.compare(key, k) == Ordering::Equal,
                None => false,
            }
        };
        if !matches {
            return None;
        }
        let old_value = self.remove_node_directly(found);
        info!("removed entry, size now {}", self.size);
        old_value
    }

    fn singleton_at_root(&self, node: u32) -> bool {
        let n = self.arena.get(node);
        n.left == node && n.right == node
    }

    // --- ordered traversal ---------------------------------------------

    pub(crate) fn first_node(&self) -> Option<u32> {
        if self.arena.get(ROOT).key.is_some() {
            return Some(ROOT);
        }
        let mut cur = self.arena.get(ROOT).left;
        if cur == ROOT {
            return None;
        }
        while self.is_downlink_edge(cur, self.arena.get(cur).left) {
            cur = self.arena.get(cur).left;
        }
        Some(self.arena.get(cur).left)
    }

    pub(crate) fn last_node(&self) -> Option<u32> {
        let mut cur = self.arena.get(ROOT).left;
        if cur == ROOT {
            return if self.arena.get(ROOT).key.is_some() {
                Some(ROOT)
            } else {
                None
            };
        }
        while self.is_downlink_edge(cur, self.arena.get(cur).right) {
            cur = self.arena.get(cur).right;
        }
        Some(self.arena.get(cur).right)
    }

    /// Successor of `n` in sort order. `bound` stops the climb at a
    /// subtree boundary, scoping iteration to a prefix view (spec §4.5).
    pub(crate) fn next_node(&self, n: u32, bound: Option<u32>) -> Option<u32> {
        if n == ROOT {
            let left = self.arena.get(ROOT).left;
            if left == ROOT {
                return None;
            }
            let mut cur = left;
            while self.is_downlink_edge(cur, self.arena.get(cur).left) {
                cur = self.arena.get(cur).left;
            }
            return Some(self.arena.get(cur).left);
        }
        let right = self.arena.get(n).right;
        if self.is_downlink_edge(n, right) {
            let mut cur = right;
            while self.is_downlink_edge(cur, self.arena.get(cur).left) {
                cur = self.arena.get(cur).left;
            }
            return Some(self.arena.get(cur).left);
        }
        let mut cur = n;
        loop {
            if Some(cur) == bound {
                return None;
            }
            let parent = match self.arena.get(cur).parent {
                Some(p) => p,
                None => return None,
            };
            // Climbing past the top of the real tree: root is the sentinel
            // that owns `root.left`, never a genuine in-order sibling, and
            // (being the global minimum when keyed) can never be a successor.
            if parent == ROOT {
                return None;
            }
            if self.arena.get(parent).left == cur {
                return Some(parent);
            }
            cur = parent;
        }
    }

    /// Predecessor of `n` in sort order, symmetric to [`Self::next_node`].
    pub(crate) fn previous_node(&self, n: u32, bound: Option<u32>) -> Option<u32> {
        if n == ROOT {
            return None; // root's own key, when present, is always the minimum.
        }
        let left = self.arena.get(n).left;
        if self.is_downlink_edge(n, left) {
            let mut cur = left;
            while self.is_downlink_edge(cur, self.arena.get(cur).right) {
                cur = self.arena.get(cur).right;
            }
            return Some(self.arena.get(cur).right);
        }
        let mut cur = n;
        loop {
            if Some(cur) == bound {
                return None;
            }
            let parent = match self.arena.get(cur).parent {
                Some(p) => p,
                None => return None,
            };
            if parent == ROOT {
                // Climbing past the top of the real tree: the root's own
                // key, when present, is the global minimum and therefore
                // the predecessor of everything in `root.left`'s subtree.
                return if self.arena.get(ROOT).key.is_some() {
                    Some(ROOT)
                } else {
                    None
                };
            }
            if self.arena.get(parent).right == cur {
                return Some(parent);
            }
            cur = parent;
        }
    }

    pub fn first_key(&self) -> Result<&K> {
        self.first_node().map(|n| self.node_key(n)).ok_or(PatriciaError::NoSuchElement)
    }

    pub fn last_key(&self) -> Result<&K> {
        self.last_node().map(|n| self.node_key(n)).ok_or(PatriciaError::NoSuchElement)
    }

    // --- prefix locator (spec §4.8) -------------------------------------

    /// Descend as in lookup but stop additionally once `current.bit_index
    /// >= length_in_bits`. Returns the candidate landing node; the caller
    /// (prefix views) still must verify the candidate actually carries the
    /// prefix via [`KeyAnalyzer::is_prefix`].
    pub(crate) fn locate_prefix_candidate(&self, prefix: &K, offset: i32, length: i32) -> Option<u32> {
        if self.size == 0 {
            return None;
        }
        let limit = offset + length;
        let full_len = self.analyzer.length_in_bits(prefix);
        let mut current = ROOT;
        let mut child = self.arena.get(ROOT).left;
        while self.is_downlink_edge(current, child) {
            let child_bi = self.arena.get(child).bit_index;
            if child_bi >= limit {
                break;
            }
            current = child;
            let cur = self.arena.get(current);
            child = if self.analyzer.is_bit_set(prefix, cur.bit_index, full_len) {
                cur.right
            } else {
                cur.left
            };
        }
        if child == ROOT && self.arena.get(ROOT).key.is_none() {
            return None;
        }
        Some(child)
    }

    fn first_in_subtree(&self, mut cur: u32) -> u32 {
        while self.is_downlink_edge(cur, self.arena.get(cur).left) {
            cur = self.arena.get(cur).left;
        }
        self.arena.get(cur).left
    }

    fn last_in_subtree(&self, mut cur: u32) -> u32 {
        while self.is_downlink_edge(cur, self.arena.get(cur).right) {
            cur = self.arena.get(cur).right;
        }
        self.arena.get(cur).right
    }

    /// Validate a prefix-locator candidate and compute the subtree's
    /// boundary entries: the first and last node actually carrying the
    /// prefix, plus the exclusive neighbors just outside that range (spec
    /// §4.8, §4.9).
    pub(crate) fn prefix_bounds(
        &self,
        prefix: &K,
        offset: i32,
        length: i32,
    ) -> Option<(u32, u32, Option<u32>, Option<u32>)> {
        let candidate = self.locate_prefix_candidate(prefix, offset, length)?;
        let node = self.arena.get(candidate);
        let key = node.key.as_ref()?;
        if candidate == ROOT {
            let root_len = self.analyzer.length_in_bits(key);
            if root_len < offset + length {
                return None;
            }
        }
        if !self.analyzer.is_prefix(prefix, offset, length, key) {
            return None;
        }
        let (first, last) = if candidate == ROOT {
            (ROOT, ROOT)
        } else {
            (self.first_in_subtree(candidate), self.last_in_subtree(candidate))
        };
        let from = self.previous_node(first, None);
        let to = self.next_node(last, None);
        Some((first, last, from, to))
    }

    // --- XOR-nearest select (spec §4.6) ---------------------------------

    fn select_leaf(
        &mut self,
        id: u32,
        cursor: &mut dyn crate::cursor::Cursor<K, V>,
    ) -> Result<Option<Entry<K, V>>>
    where
        K: Clone,
        V: Clone,
    {
        let entry = self.entry_at(id);
        match cursor.select(&entry) {
            crate::cursor::Decision::Continue => Ok(None),
            crate::cursor::Decision::Exit => Ok(Some(entry)),
            crate::cursor::Decision::RemoveAndExit => {
                self.remove_by_node(id);
                Ok(Some(entry))
            }
            crate::cursor::Decision::Remove => {
                Err(PatriciaError::Unsupported("REMOVE is illegal during select"))
            }
        }
    }

    fn select_branch(
        &mut self,
        current: u32,
        child: u32,
        key: &K,
        len: i32,
        cursor: &mut dyn crate::cursor::Cursor<K, V>,
    ) -> Result<Option<Entry<K, V>>>
    where
        K: Clone,
        V: Clone,
    {
        if self.is_downlink_edge(current, child) {
            self.select_from(child, key, len, cursor)
        } else {
            self.select_leaf(child, cursor)
        }
    }

    fn select_from(
        &mut self,
        current: u32,
        key: &K,
        len: i32,
        cursor: &mut dyn crate::cursor::Cursor<K, V>,
    ) -> Result<Option<Entry<K, V>>>
    where
        K: Clone,
        V: Clone,
    {
        let cur_bit = self.arena.get(current).bit_index;
        let bit = self.analyzer.is_bit_set(key, cur_bit, len);
        let (near, far) = if bit {
            (self.arena.get(current).right, self.arena.get(current).left)
        } else {
            (self.arena.get(current).left, self.arena.get(current).right)
        };
        if let Some(result) = self.select_branch(current, near, key, len, cursor)? {
            return Ok(Some(result));
        }
        if far == near {
            return Ok(None); // singleton node: both sides already visited.
        }
        self.select_branch(current, far, key, len, cursor)
    }

    /// Visit stored entries in order of XOR-closeness to `key`, stopping
    /// at the cursor's direction (spec §4.6).
    pub fn select(
        &mut self,
        key: &K,
        cursor: &mut dyn crate::cursor::Cursor<K, V>,
    ) -> Result<Option<Entry<K, V>>>
    where
        K: Clone,
        V: Clone,
    {
        trace!("select: searching for XOR-nearest entry");
        if self.size == 0 {
            return Ok(None);
        }
        let len = self.analyzer.length_in_bits(key);
        if self.arena.get(ROOT).key.is_some() {
            if let Some(result) = self.select_leaf(ROOT, cursor)? {
                return Ok(Some(result));
            }
        }
        let root_left = self.arena.get(ROOT).left;
        if root_left == ROOT {
            return Ok(None);
        }
        self.select_from(root_left, key, len, cursor)
    }

    // --- full traverse (spec §4.7) --------------------------------------

    /// Walk every entry in sorted order, applying the cursor's decision at
    /// each step. Unlike [`Self::select`], `Remove` is legal here: deletion
    /// happens in place and iteration resumes from the successor computed
    /// before the node was freed.
    pub fn traverse(
        &mut self,
        cursor: &mut dyn crate::cursor::Cursor<K, V>,
    ) -> Result<Option<Entry<K, V>>>
    where
        K: Clone,
        V: Clone,
    {
        let mut current = self.first_node();
        while let Some(id) = current {
            let entry = self.entry_at(id);
            let next = self.next_node(id, None);
            match cursor.select(&entry) {
                crate::cursor::Decision::Continue => {
                    current = next;
                }
                crate::cursor::Decision::Exit => {
                    return Ok(Some(entry));
                }
                crate::cursor::Decision::Remove => {
                    self.remove_by_node(id);
                    current = next;
                }
                crate::cursor::Decision::RemoveAndExit => {
                    self.remove_by_node(id);
                    return Ok(Some(entry));
                }
            }
        }
        Ok(None)
    }

    /// Remove a node already known to be live, by arena id. Used by
    /// iterators (`Iter::remove`) and by cursor-driven `select`/`traverse`.
    pub(crate) fn remove_by_node(&mut self, id: u32) -> Option<V> {
        if id == ROOT {
            return self.remove_root();
        }
        self.remove_node_directly(id)
    }

    fn remove_node_directly(&mut self, id: u32) -> Option<V> {
        let is_external = {
            let node = self.arena.get(id);
            node.left == id || node.right == id
        };
        if is_external && self.arena.get(id).parent == Some(ROOT) && self.singleton_at_root(id) {
            self.arena.get_mut(ROOT).left = ROOT;
        } else if is_external {
            self.delete_external(id);
        } else {
            self.delete_internal(id);
        }
        let (_, old_value) = self.arena.free(id);
        self.size -= 1;
        self.mod_count += 1;
        old_value
    }

    // --- ceiling/floor/higher/lower (spec §4.10) ------------------------
    //
    // Implemented by local decision at the nearest-entry landing point
    // rather than by a temporary probe insertion; the design notes call
    // the two strategies equivalent and this one needs no rollback of
    // `mod_count`.

    pub(crate) fn nearest_neighbor(&self, key: &K, want_floor: bool, strict: bool) -> Option<u32> {
        if self.size == 0 {
            return None;
        }
        // `get_nearest_entry` already walks correctly for a zero-length
        // query (every `is_bit_set` read past a key's length is `0`, so it
        // simply follows the leftmost spine); no separate zero-length case
        // is needed here.
        let found = self.get_nearest_entry(key);
        if self.arena.get(found).key.is_none() {
            // The real tree is empty; only the root can possibly qualify.
            return if self.arena.get(ROOT).key.is_some() {
                Some(ROOT)
            } else {
                None
            };
        }
        match self.analyzer.compare(key, self.node_key(found)) {
            Ordering::Equal => {
                if strict {
                    if want_floor {
                        self.previous_node(found, None)
                    } else {
                        self.next_node(found, None)
                    }
                } else {
                    Some(found)
                }
            }
            Ordering::Less => {
                if want_floor {
                    self.previous_node(found, None)
                } else {
                    Some(found)
                }
            }
            Ordering::Greater => {
                if want_floor {
                    Some(found)
                } else {
                    self.next_node(found, None)
                }
            }
        }
    }

    pub fn floor_key(&self, key: &K) -> Option<&K> {
        self.floor_node(key).map(|n| self.node_key(n))
    }

    pub fn ceiling_key(&self, key: &K) -> Option<&K> {
        self.ceiling_node(key).map(|n| self.node_key(n))
    }

    pub fn lower_key(&self, key: &K) -> Option<&K> {
        self.lower_node(key).map(|n| self.node_key(n))
    }

    pub fn higher_key(&self, key: &K) -> Option<&K> {
        self.higher_node(key).map(|n| self.node_key(n))
    }

    pub(crate) fn floor_node(&self, key: &K) -> Option<u32> {
        self.nearest_neighbor(key, true, false)
    }

    pub(crate) fn ceiling_node(&self, key: &K) -> Option<u32> {
        self.nearest_neighbor(key, false, false)
    }

    pub(crate) fn lower_node(&self, key: &K) -> Option<u32> {
        self.nearest_neighbor(key, true, true)
    }

    pub(crate) fn higher_node(&self, key: &K) -> Option<u32> {
        self.nearest_neighbor(key, false, true)
    }
}

// --- view constructors (spec §6) ----------------------------------------

impl<K, V, A> PatriciaTrie<K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
{
    /// `[from, to)` with default inclusivity (`from` inclusive, `to` exclusive).
    pub fn sub_map(&mut self, from: K, to: K) -> crate::range::RangeView<'_, K, V, A> {
        crate::range::RangeView::new(self, Some((from, true)), Some((to, false)))
    }

    /// `[_, to)`, exclusive on `to`.
    pub fn head_map(&mut self, to: K) -> crate::range::RangeView<'_, K, V, A> {
        crate::range::RangeView::new(self, None, Some((to, false)))
    }

    /// `[from, _)`, inclusive on `from`.
    pub fn tail_map(&mut self, from: K) -> crate::range::RangeView<'_, K, V, A> {
        crate::range::RangeView::new(self, Some((from, true)), None)
    }

    /// Prefix view using the whole key.
    pub fn get_prefixed_by(&mut self, key: K) -> crate::prefix::PrefixView<'_, K, V, A> {
        let length = self.analyzer.length_in_bits(&key);
        crate::prefix::PrefixView::new(self, key, 0, length)
    }

    /// Prefix view over the first `length` elements of `key`.
    pub fn get_prefixed_by_len(&mut self, key: K, length: i32) -> Result<crate::prefix::PrefixView<'_, K, V, A>> {
        self.get_prefixed_by_offset_len(key, 0, length)
    }

    /// Prefix view over `length` elements of `key` starting at element `offset`.
    pub fn get_prefixed_by_offset_len(
        &mut self,
        key: K,
        offset: i32,
        length: i32,
    ) -> Result<crate::prefix::PrefixView<'_, K, V, A>> {
        let bpe = self.analyzer.bits_per_element();
        self.get_prefixed_by_bits_offset(key, offset * bpe, length * bpe)
    }

    /// Prefix view over the first `length_in_bits` bits of `key`.
    pub fn get_prefixed_by_bits(&mut self, key: K, length_in_bits: i32) -> crate::prefix::PrefixView<'_, K, V, A> {
        crate::prefix::PrefixView::new(self, key, 0, length_in_bits)
    }

    /// Prefix view over `length_in_bits` bits of `key` starting at bit `offset_in_bits`.
    pub fn get_prefixed_by_bits_offset(
        &mut self,
        key: K,
        offset_in_bits: i32,
        length_in_bits: i32,
    ) -> Result<crate::prefix::PrefixView<'_, K, V, A>> {
        let bpe = self.analyzer.bits_per_element();
        if offset_in_bits % bpe != 0 || length_in_bits % bpe != 0 {
            return Err(PatriciaError::IllegalArgument(
                "prefix offset/length must be a multiple of the analyzer's element width",
            ));
        }
        Ok(crate::prefix::PrefixView::new(self, key, offset_in_bits, length_in_bits))
    }

    pub fn key_set(&mut self) -> crate::collections::KeySet<'_, K, V, A>
    where
        V: Clone,
    {
        crate::collections::KeySet::new(self)
    }

    pub fn values(&mut self) -> crate::collections::ValuesView<'_, K, V, A>
    where
        V: Clone,
    {
        crate::collections::ValuesView::new(self)
    }

    pub fn entry_set(&mut self) -> crate::collections::EntrySet<'_, K, V, A>
    where
        V: Clone,
    {
        crate::collections::EntrySet::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{ByteKeyAnalyzer, StringKeyAnalyzer};
    use crate::cursor::Decision;

    fn bytes(v: &[u8]) -> Vec<u8> {
        v.to_vec()
    }

    #[test]
    fn put_get_replace() {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        assert_eq!(trie.put(bytes(&[1, 2, 3]), 10), None);
        assert_eq!(trie.get(&bytes(&[1, 2, 3])), Some(&10));
        assert_eq!(trie.put(bytes(&[1, 2, 3]), 20), Some(10));
        assert_eq!(trie.size(), 1);
    }

    #[test]
    fn put_many_preserves_each_lookup() {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        let entries: Vec<(Vec<u8>, i32)> = (0..64u8).map(|b| (bytes(&[b, b.wrapping_mul(7)]), b as i32)).collect();
        for (k, v) in &entries {
            trie.put(k.clone(), *v);
        }
        assert_eq!(trie.size(), entries.len());
        for (k, v) in &entries {
            assert_eq!(trie.get(k), Some(v));
        }
    }

    #[test]
    fn remove_then_size_and_lookup() {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        trie.put(bytes(&[1]), 1);
        trie.put(bytes(&[2]), 2);
        trie.put(bytes(&[3]), 3);
        assert_eq!(trie.remove(&bytes(&[2])), Some(2));
        assert_eq!(trie.get(&bytes(&[2])), None);
        assert_eq!(trie.size(), 2);
        assert_eq!(trie.remove(&bytes(&[2])), None);
    }

    #[test]
    fn zero_length_key_stores_at_root() {
        let mut trie: PatriciaTrie<Vec<u8>, i32, ByteKeyAnalyzer> = PatriciaTrie::new(ByteKeyAnalyzer);
        assert_eq!(trie.put(Vec::new(), 0), None);
        assert_eq!(trie.get(&Vec::new()), Some(&0));
        assert_eq!(trie.first_key().unwrap(), &Vec::<u8>::new());
    }

    #[test]
    fn scenario_ordered_iteration_with_empty_key() {
        // spec.md §8 scenario 2, adapted to byte keys (empty, "a", "b").
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        trie.put(Vec::new(), 0);
        trie.put(bytes(b"a"), 1);
        trie.put(bytes(b"b"), 2);
        assert_eq!(trie.first_key().unwrap(), &Vec::<u8>::new());
        assert_eq!(trie.last_key().unwrap(), &bytes(b"b"));
        let mut cur = trie.first_node();
        let mut seen = Vec::new();
        while let Some(id) = cur {
            seen.push(trie.node_key(id).clone());
            cur = trie.next_node(id, None);
        }
        assert_eq!(seen, vec![Vec::new(), bytes(b"a"), bytes(b"b")]);
    }

    #[test]
    fn scenario_select_xor_nearest() {
        // spec.md §8 scenario 3, adapted to byte keys "ABC"/"ABD".
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        trie.put(bytes(b"ABC"), 1);
        trie.put(bytes(b"ABD"), 2);
        let result = trie
            .select(&bytes(b"ABE"), &mut |_entry: &Entry<Vec<u8>, i32>| Decision::Exit)
            .unwrap();
        assert_eq!(result.unwrap().key(), &bytes(b"ABD"));
        let exact = trie.select(&bytes(b"ABC"), &mut |_: &Entry<Vec<u8>, i32>| Decision::Exit).unwrap();
        assert_eq!(exact.unwrap().key(), &bytes(b"ABC"));
    }

    #[test]
    fn scenario_remove_and_exit_during_traverse() {
        // spec.md §8 scenario 4.
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        trie.put(bytes(b"x"), 1);
        let result = trie
            .traverse(&mut |_: &Entry<Vec<u8>, i32>| Decision::RemoveAndExit)
            .unwrap();
        assert_eq!(result.unwrap().key(), &bytes(b"x"));
        assert_eq!(trie.size(), 0);
    }

    #[test]
    fn closures_implement_cursor() {
        use crate::cursor::Cursor;
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        trie.put(bytes(b"x"), 1);
        let mut calls = 0;
        let mut cursor = |_entry: &Entry<Vec<u8>, i32>| {
            calls += 1;
            Decision::Exit
        };
        let result = trie.select(&bytes(b"x"), &mut cursor).unwrap();
        assert!(result.is_some());
        assert_eq!(calls, 1);
    }

    #[test]
    fn select_remove_is_unsupported() {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        trie.put(bytes(b"x"), 1);
        let err = trie
            .select(&bytes(b"x"), &mut |_: &Entry<Vec<u8>, i32>| Decision::Remove)
            .unwrap_err();
        assert_eq!(err, PatriciaError::Unsupported("REMOVE is illegal during select"));
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        trie.put(bytes(&[1]), 1);
        trie.put(bytes(&[2]), 2);
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.size(), 0);
        assert_eq!(trie.first_key(), Err(PatriciaError::NoSuchElement));
    }

    #[test]
    fn ceiling_floor_higher_lower() {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        trie.put(bytes(&[10]), 1);
        trie.put(bytes(&[20]), 2);
        trie.put(bytes(&[30]), 3);
        assert_eq!(trie.floor_key(&bytes(&[20])), Some(&bytes(&[20])));
        assert_eq!(trie.lower_key(&bytes(&[20])), Some(&bytes(&[10])));
        assert_eq!(trie.ceiling_key(&bytes(&[20])), Some(&bytes(&[20])));
        assert_eq!(trie.higher_key(&bytes(&[20])), Some(&bytes(&[30])));
        assert_eq!(trie.lower_key(&bytes(&[10])), None);
        assert_eq!(trie.higher_key(&bytes(&[30])), None);
    }

    #[test]
    fn remove_internal_node_promotes_predecessor() {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        for b in [0b0000_0000u8, 0b1000_0000, 0b1100_0000, 0b1110_0000] {
            trie.put(bytes(&[b]), b as i32);
        }
        assert_eq!(trie.remove(&bytes(&[0b1000_0000])), Some(0b1000_0000i32));
        assert_eq!(trie.size(), 3);
        for b in [0b0000_0000u8, 0b1100_0000, 0b1110_0000] {
            assert_eq!(trie.get(&bytes(&[b])), Some(&(b as i32)));
        }
        assert_eq!(trie.get(&bytes(&[0b1000_0000])), None);
    }

    #[test]
    fn string_analyzer_prefix_scenario() {
        // spec.md §8 scenario 1.
        let mut trie = PatriciaTrie::new(StringKeyAnalyzer);
        trie.put("Lime".to_string(), 1);
        trie.put("LimeWire".to_string(), 2);
        trie.put("LimeRadio".to_string(), 3);
        assert_eq!(trie.size(), 3);
        let mut view = trie.get_prefixed_by("Lime".to_string());
        let seen: Vec<String> = view.iter().map(|e| e.into_inner().0).collect();
        assert_eq!(seen, vec!["Lime".to_string(), "LimeRadio".to_string(), "LimeWire".to_string()]);
    }
}
