//! Example: Load and display the permission catalog from permission-catalog/.

use permset_catalog::{CatalogLoader, CatalogRegistry};
use permset_core::AppConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading permission catalog...\n");

    let config = AppConfig::load_with_env()?;
    let loader = match CatalogLoader::from_config(&config) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("\nMake sure you're running this from the workspace root!");
            return Err(Box::new(e));
        }
    };

    let registry = CatalogRegistry::load_from(&loader)?;

    println!("Loaded {} domains:\n", registry.count());

    for domain in registry.domains() {
        println!("  {} ({} permissions)", domain.name(), domain.permissions.len());

        for permission in domain.permissions() {
            let subdomain = permission.subdomain.as_deref().unwrap_or("-");
            println!(
                "    [{subdomain}] {} ({})",
                permission.name, permission.supported_actions
            );
        }

        println!();
    }

    if let Some(query) = std::env::args().nth(1) {
        let hits = registry.search(&query);
        if hits.is_empty() {
            println!("No results found for \"{query}\"");
        } else {
            println!("Domains matching \"{query}\":");
            for domain in hits {
                println!("  {}", domain.name());
            }
        }
    }

    Ok(())
}
