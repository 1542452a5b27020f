//! Player/obstacle contact detection and classification

use serde::{Deserialize, Serialize};

use super::obstacles::Obstacle;
use super::player::Player;

/// How the player touched an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Falling onto the top face: collect the obstacle
    Landing,
    /// Side or underside: costs a life
    Hit,
}

/// Classify the contact between the player and an uncollected obstacle.
///
/// A landing needs the player to be falling with its top edge above the
/// obstacle's top edge; any other overlap is a hit. Collected obstacles never
/// make contact.
pub fn classify_contact(player: &Player, obstacle: &Obstacle) -> Option<Contact> {
    if obstacle.collected || !player.rect().overlaps(&obstacle.rect()) {
        return None;
    }
    if player.velocity_y > 0.0 && player.pos.y < obstacle.pos.y {
        Some(Contact::Landing)
    } else {
        Some(Contact::Hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::create_all;
    use crate::tuning::Tuning;

    fn setup() -> (Player, Obstacle) {
        let tuning = Tuning::default();
        let player = Player::new(tuning.ground_y);
        let mut obstacle = create_all(&tuning).remove(0);
        obstacle.pos.x = player.pos.x + 10.0;
        (player, obstacle)
    }

    #[test]
    fn test_no_contact_when_apart() {
        let (player, mut obstacle) = setup();
        obstacle.pos.x = 500.0;
        assert_eq!(classify_contact(&player, &obstacle), None);
    }

    #[test]
    fn test_standing_on_ground_only_touches() {
        // Obstacle bottom edge sits on the player's top edge at rest
        let (player, obstacle) = setup();
        assert_eq!(classify_contact(&player, &obstacle), None);
    }

    #[test]
    fn test_falling_from_above_lands() {
        let (mut player, obstacle) = setup();
        player.pos.y = obstacle.pos.y - 10.0;
        player.velocity_y = 120.0;
        assert_eq!(classify_contact(&player, &obstacle), Some(Contact::Landing));
    }

    #[test]
    fn test_rising_into_obstacle_is_hit() {
        let (mut player, obstacle) = setup();
        player.pos.y = obstacle.pos.y - 10.0;
        player.velocity_y = -200.0;
        assert_eq!(classify_contact(&player, &obstacle), Some(Contact::Hit));
    }

    #[test]
    fn test_falling_below_top_is_hit() {
        let (mut player, obstacle) = setup();
        player.pos.y = obstacle.pos.y + 5.0;
        player.velocity_y = 50.0;
        assert_eq!(classify_contact(&player, &obstacle), Some(Contact::Hit));
    }

    #[test]
    fn test_collected_obstacle_is_ignored() {
        let (mut player, mut obstacle) = setup();
        player.pos.y = obstacle.pos.y - 10.0;
        player.velocity_y = 120.0;
        obstacle.collected = true;
        assert_eq!(classify_contact(&player, &obstacle), None);
    }
}
