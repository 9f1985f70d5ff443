use log::trace;

use rand::Rng;

use patricia_store::{ByteKeyAnalyzer, PatriciaTrie};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    trace!("starting random workload....");
    let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);

    let mut rng = rand::thread_rng();
    let mut inserted = 0_u32;

    while inserted < 10_000 {
        let key: Vec<u8> = (0..rng.gen_range(1..8)).map(|_| rng.gen()).collect();
        let value: u32 = rng.gen();
        trie.put(key, value);
        inserted += 1;
    }

    println!("------ end of inserts");
    println!("size: {}", trie.size());

    let mut removed = 0_u32;
    let mut entries = trie.entry_set();
    let mut it = entries.iter();
    while let Some(entry) = it.try_next()? {
        if entry.value() % 2 == 0 {
            it.remove()?;
            removed += 1;
        }
    }
    drop(entries);

    println!("removed {removed} even-valued entries, {} remain", trie.size());

    Ok(())
}
