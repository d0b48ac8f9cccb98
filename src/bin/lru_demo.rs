use anyhow::Result;
use sync_lru::LruCache;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CAPACITY: usize = 2;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cache: LruCache<String, i32> = LruCache::new(CAPACITY)?;
    info!(capacity = cache.capacity(), "cache ready");

    cache.put("a".to_string(), 1);
    cache.put("b".to_string(), 2);

    match cache.get("a") {
        Some(value) => println!("Key 'a' found with value: {}", value),
        None => println!("Key 'a' not found"),
    }

    cache.put("d".to_string(), 4);

    if cache.get("b").is_none() {
        println!("Key 'b' was removed from cache");
    }

    info!(len = cache.len(), keys = ?cache.keys(), "done");
    Ok(())
}
