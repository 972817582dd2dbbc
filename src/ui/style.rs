use super::red_panel::CollectionState;
use eframe::egui::Color32;

impl From<&CollectionState> for Color32 {
    fn from(value: &CollectionState) -> Color32 {
        match value {
            CollectionState::Idle => Color32::LIGHT_GRAY,
            CollectionState::Collecting => Color32::GREEN,
        }
    }
}
