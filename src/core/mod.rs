pub mod blit;
pub mod demo_scene;
pub mod frame_plan;
pub mod game_viewport;
pub mod gpu_context;
pub mod offscreen;
pub mod recent_sizes;
pub mod renderer;
pub mod resolution_menu;
pub mod settings;
pub mod size_input;
pub mod size_mode;
pub mod wgpu_backend;

pub use blit::BlitPipeline;
pub use demo_scene::DemoScene;
pub use frame_plan::{plan_frame, window_rect, FramePlan, RenderPath};
pub use game_viewport::{calculate_game_viewport, ExternalTarget, GameViewport};
pub use gpu_context::GpuContext;
pub use offscreen::OffscreenBuffer;
pub use recent_sizes::{RecentSizeHistory, RECENT_SIZE_CAPACITY};
pub use renderer::ViewportRenderer;
pub use resolution_menu::{
    resolution_choices, ChoiceGroup, ResolutionAction, ResolutionChoice, FIXED_PRESETS,
};
pub use settings::{PersistedView, SettingsFile};
pub use size_input::{clamp_size, parse_size};
pub use size_mode::{SizeHint, SizeMode, SizeModeKind};
pub use wgpu_backend::{GpuScene, OffscreenTarget, WgpuBackend};
