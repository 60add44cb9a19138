//! Print the party and the enemy bestiary.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use runia_battle::Character;
use runia_battle::bestiary;

pub fn run() -> Result<(), String> {
    println!("  {}", "Party".bold());
    print_table(&bestiary::party());

    println!();
    println!("  {}", "Bestiary".bold());
    print_table(&[
        bestiary::pirate(),
        bestiary::giant_rat(),
        bestiary::feral_shih_tzu(),
        bestiary::skeleton(),
        bestiary::ooze(),
        bestiary::necromancer(),
    ]);
    Ok(())
}

fn print_table(characters: &[Character]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "HP", "Size", "Actions"]);
    for character in characters {
        let actions: Vec<&str> = character.actions.iter().map(|a| a.name()).collect();
        table.add_row(vec![
            character.name.clone(),
            format!("{}/{}", character.health, character.max_health),
            character.size.to_string(),
            actions.join(", "),
        ]);
    }
    println!("{table}");
}
