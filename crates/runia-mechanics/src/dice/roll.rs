//! Exploding rolls with advantage and disadvantage.

use super::Die;
use super::roller::DieRoller;

/// Roll `quantity` dice of the given type, sorted ascending.
pub fn rolls(roller: &mut dyn DieRoller, quantity: u32, die: Die) -> Vec<u32> {
    let mut values: Vec<u32> = (0..quantity).map(|_| roller.roll_die(die)).collect();
    values.sort_unstable();
    values
}

/// Roll an exploding pool of `quantity` dice.
///
/// Advantage and disadvantage cancel; the surplus adds that many extra
/// dice, of which only the highest (advantage) or lowest (disadvantage)
/// `quantity` are kept. Every kept die showing its maximum face explodes:
/// one additional plain die is rolled for each, recursively, with no
/// depth cap. The recursion converges because each round rolls only as
/// many dice as exploded in the previous one.
///
/// The result is always at least `quantity`.
pub fn explode_roll(
    roller: &mut dyn DieRoller,
    quantity: u32,
    die: Die,
    advantage: u32,
    disadvantage: u32,
) -> u32 {
    let net = i64::from(advantage) - i64::from(disadvantage);
    let extra = u32::try_from(net.unsigned_abs()).unwrap_or(u32::MAX);
    let keep = quantity as usize;

    let kept: Vec<u32> = if net > 0 {
        let all = rolls(roller, quantity + extra, die);
        all[all.len() - keep..].to_vec()
    } else if net < 0 {
        let all = rolls(roller, quantity + extra, die);
        all[..keep].to_vec()
    } else {
        rolls(roller, quantity, die)
    };

    let sum: u32 = kept.iter().sum();
    let exploding = kept.iter().filter(|&&v| v == die.sides()).count() as u32;
    if exploding > 0 {
        explode_roll(roller, exploding, die, 0, 0) + sum
    } else {
        sum
    }
}

/// A standard check: one exploding d20 plus an exploding pool of weapon
/// dice.
///
/// Every damage and healing roll in the game runs through this shape.
/// The flat d20 component is what the downstream banding subtracts back
/// out; removing it changes the hit curve everywhere at once.
pub fn roll(
    roller: &mut dyn DieRoller,
    quantity: u32,
    die: Die,
    advantage: u32,
    disadvantage: u32,
) -> u32 {
    explode_roll(roller, 1, Die::D20, 0, 0)
        + explode_roll(roller, quantity, die, advantage, disadvantage)
}
