//! List menus command handler

use crate::config::Config;
use crate::db::Store;
use crate::models::menu::MenuFilter;

pub async fn cmd_list_menus(config: &Config, limit: usize) -> anyhow::Result<()> {
    let store = Store::from_config(config).await?;
    let menus = store.list_menus(&MenuFilter::default()).await?;

    if menus.is_empty() {
        println!("No menus yet.");
        return Ok(());
    }

    println!("Menus ({} total, newest first)", menus.len());
    println!("{:-<70}", "");

    for menu in menus.into_iter().take(limit) {
        println!("{} {} [id {}]", menu.date, menu.name, menu.id);
        if menu.options.is_empty() {
            println!("  (no options)");
        }
        for option in &menu.options {
            println!("  • {} ({})", option.description, option.id);
        }
    }

    Ok(())
}
