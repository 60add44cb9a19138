//! Roll a dice expression through the exploding-dice engine.

use colored::Colorize;
use runia_mechanics::{Die, RandomRoller, explode_roll, roll};

pub fn run(
    expression: &str,
    advantage: u32,
    disadvantage: u32,
    check: bool,
    seed: Option<u64>,
) -> Result<(), String> {
    let (quantity, die) = parse_expression(expression)?;
    let mut roller = match seed {
        Some(seed) => RandomRoller::seeded(seed),
        None => RandomRoller::new(),
    };

    let total = if check {
        roll(&mut roller, quantity, die, advantage, disadvantage)
    } else {
        explode_roll(&mut roller, quantity, die, advantage, disadvantage)
    };

    let mut label = format!("{quantity}{die}");
    if advantage > 0 {
        label.push_str(&format!(" adv {advantage}"));
    }
    if disadvantage > 0 {
        label.push_str(&format!(" dis {disadvantage}"));
    }
    if check {
        label.push_str(" with d20 check");
    }
    println!("  {}  {}", label.dimmed(), total.to_string().bold());
    Ok(())
}

/// Parse an expression like "2d6", "d20", "3d10" into count and die.
fn parse_expression(expression: &str) -> Result<(u32, Die), String> {
    let trimmed = expression.trim();
    let (count, sides) = trimmed
        .split_once(['d', 'D'])
        .ok_or_else(|| format!("'{trimmed}' is not a dice expression like 2d6"))?;

    let quantity = if count.is_empty() {
        1
    } else {
        count
            .parse::<u32>()
            .map_err(|_| format!("'{count}' is not a dice count"))?
    };
    if quantity == 0 {
        return Err("dice count must be at least 1".to_string());
    }

    let die = Die::from_str_tag(&format!("d{sides}"))
        .ok_or_else(|| format!("'d{sides}' is not a die"))?;
    Ok((quantity, die))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_count_and_die() {
        assert_eq!(parse_expression("2d6"), Ok((2, Die::D6)));
        assert_eq!(parse_expression("3D10"), Ok((3, Die::D10)));
        assert_eq!(parse_expression("1d30"), Ok((1, Die::Custom(30))));
    }

    #[test]
    fn bare_die_rolls_one() {
        assert_eq!(parse_expression("d20"), Ok((1, Die::D20)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_expression("six").is_err());
        assert!(parse_expression("0d6").is_err());
        assert!(parse_expression("2d1").is_err());
        assert!(parse_expression("xd6").is_err());
    }
}
