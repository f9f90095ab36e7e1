use catalog_core::config::DEFAULT_ORIGIN;
use catalog_core::{CatalogClient, CatalogResolver, CatalogSnapshot, NavTarget, SeasonPage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = CatalogClient::new()?;
    let resolver = CatalogResolver::new(client, DEFAULT_ORIGIN);
    let snapshot = CatalogSnapshot::seeded();

    for series in snapshot.series() {
        println!("📺 {} ({})", series.display_title(), series.id);

        let page = resolver.resolve(&snapshot, &series.id, None).await?;
        let list = match page {
            SeasonPage::Seasons(list) => list,
            other => {
                println!("  {:?}", other);
                continue;
            }
        };

        if let Some(trailer) = &list.trailer {
            println!("  🎞  trailer: {}", trailer.src);
        }
        for entry in &list.standalone {
            println!("  ▶ {}", entry.label);
        }

        for season in &list.seasons {
            println!("\n  📋 {}", season.id);
            let page = resolver
                .resolve(&snapshot, &series.id, Some(&season.id))
                .await?;
            match page {
                SeasonPage::Episodes { list } => {
                    for entry in list.entries() {
                        let src = entry
                            .play_target()
                            .and_then(|t| match t {
                                NavTarget::Episode { src, .. } => src.clone(),
                                _ => None,
                            })
                            .unwrap_or_else(|| "—".to_string());
                        println!("    {} {}", entry.label, src);
                    }
                }
                other => println!("    {:?}", other),
            }
        }
    }

    Ok(())
}
