use crate::{
    cli::{actions::Action, globals::GlobalArgs},
    components::GenreSelect,
    features::genres::load_categories,
};
use anyhow::{anyhow, Result};
use tracing::info;

/// Handle the genres action
pub fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Genres { catalog, select } = action else {
        return Err(anyhow!("genres handler called with {action:?}"));
    };

    let messages = globals.catalog()?;
    let categories = load_categories(&catalog)?;
    let mut widget = GenreSelect::new(categories, None, |value| info!(value, "genre changed"));

    if let Some(value) = select.as_deref() {
        widget.open();
        if !widget.select(value) {
            return Err(anyhow!("unknown genre: {value}"));
        }
    }

    println!("{}", widget.title(&messages));
    for category in widget.categories() {
        println!("{}", category.category);
        for option in &category.options {
            let marker = if widget.is_selected(option) { '*' } else { ' ' };
            println!("  {marker} {} ({})", option.label, option.value);
        }
    }
    println!("{}", widget.button_label(&messages));

    Ok(())
}
