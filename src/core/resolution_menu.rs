use super::recent_sizes::RecentSizeHistory;
use super::size_mode::SizeMode;
use crate::math::Size;

/// Built-in fixed resolutions offered to the user
pub const FIXED_PRESETS: [Size; 4] = [
    Size::new(1920, 1080),
    Size::new(1280, 1024),
    Size::new(800, 600),
    Size::new(320, 300),
];

/// Maximum recent custom sizes listed after the presets
pub const MAX_RECENT_CHOICES: usize = 3;

/// What selecting a choice does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionAction {
    MatchDisplayArea,
    MatchExternalTarget,
    Fixed(Size),
}

/// Section a choice is listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChoiceGroup {
    Dynamic,
    Preset,
    Recent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionChoice {
    pub label: String,
    pub action: ResolutionAction,
    pub group: ChoiceGroup,
    pub checked: bool,
}

/// List resolution choices for the current state
///
/// Dynamic modes come first, then the fixed presets, then up to
/// `MAX_RECENT_CHOICES` recent sizes that aren't presets.
pub fn resolution_choices(
    mode: &SizeMode,
    target_size: Size,
    recent: &RecentSizeHistory,
) -> Vec<ResolutionChoice> {
    let mut choices = vec![
        ResolutionChoice {
            label: "GameView Size".to_string(),
            action: ResolutionAction::MatchDisplayArea,
            group: ChoiceGroup::Dynamic,
            checked: *mode == SizeMode::MatchDisplayArea,
        },
        ResolutionChoice {
            label: "Target Size".to_string(),
            action: ResolutionAction::MatchExternalTarget,
            group: ChoiceGroup::Dynamic,
            checked: *mode == SizeMode::MatchExternalTarget,
        },
    ];

    let fixed_choice = |size: Size, group: ChoiceGroup| ResolutionChoice {
        label: size.to_string(),
        action: ResolutionAction::Fixed(size),
        group,
        checked: target_size == size,
    };

    choices.extend(FIXED_PRESETS.iter().map(|&size| fixed_choice(size, ChoiceGroup::Preset)));
    choices.extend(
        recent
            .iter()
            .filter(|size| !FIXED_PRESETS.contains(*size))
            .take(MAX_RECENT_CHOICES)
            .map(|&size| fixed_choice(size, ChoiceGroup::Recent)),
    );

    choices
}
