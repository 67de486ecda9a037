//! Conversation lifecycle actions

use super::Event;

/// Start the conversation over
pub fn restart() -> Vec<Event> {
    vec![Event::Restart]
}

/// Clear every slot but keep the conversation
pub fn reset_slots() -> Vec<Event> {
    vec![Event::ResetSlots]
}
