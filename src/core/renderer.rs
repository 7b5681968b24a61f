use glam::Vec2;
use log::{debug, trace};
use serde_json::Value;

use super::frame_plan::{plan_frame, window_rect, FramePlan, RenderPath};
use super::game_viewport::ExternalTarget;
use super::offscreen::OffscreenBuffer;
use super::recent_sizes::RecentSizeHistory;
use super::resolution_menu::{resolution_choices, ResolutionAction, ResolutionChoice};
use super::settings::PersistedView;
use super::size_input::{clamp_size, parse_size};
use super::size_mode::{SizeHint, SizeMode};
use crate::error::Result;
use crate::math::{fits, Color, Rect, Size};
use crate::traits::{GraphicsBackend, ViewHost};

/// Presents a game image inside a host display area
///
/// Renders directly into a centered window rect when the target size fits
/// the display area, and through an offscreen buffer scaled to fit when it
/// doesn't. The offscreen buffer exists only while the target is oversized.
pub struct ViewportRenderer<B: GraphicsBackend, H: ViewHost> {
    backend: B,
    host: H,
    mode: SizeMode,
    target_size: Size,
    display_area: Size,
    external: ExternalTarget,
    recent: RecentSizeHistory,
    offscreen: OffscreenBuffer<B::Target>,
    last_path: Option<RenderPath>,
}

impl<B: GraphicsBackend, H: ViewHost> ViewportRenderer<B, H> {
    pub fn new(backend: B, host: H, display_area: Size) -> Self {
        Self {
            backend,
            host,
            mode: SizeMode::default(),
            target_size: Size::ZERO,
            display_area,
            external: ExternalTarget::default(),
            recent: RecentSizeHistory::new(),
            offscreen: OffscreenBuffer::new(),
            last_path: None,
        }
    }

    pub fn with_external_target(mut self, external: ExternalTarget) -> Self {
        self.external = external;
        self
    }

    // === State ===

    pub fn mode(&self) -> SizeMode {
        self.mode
    }

    pub fn target_size(&self) -> Size {
        self.target_size
    }

    pub fn display_area(&self) -> Size {
        self.display_area
    }

    pub fn external_target(&self) -> &ExternalTarget {
        &self.external
    }

    pub fn recent_sizes(&self) -> &RecentSizeHistory {
        &self.recent
    }

    pub fn fits(&self) -> bool {
        fits(self.target_size, self.display_area)
    }

    pub fn size_hint(&self) -> SizeHint {
        SizeHint::for_state(&self.mode, self.fits())
    }

    /// Path taken by the most recently rendered frame
    pub fn last_path(&self) -> Option<RenderPath> {
        self.last_path
    }

    pub fn offscreen_size(&self) -> Option<Size> {
        self.offscreen.size()
    }

    pub fn has_offscreen_buffer(&self) -> bool {
        self.offscreen.is_allocated()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Display-area rect the game image occupies
    pub fn rendered_viewport(&self) -> Rect {
        window_rect(self.target_size, self.display_area)
    }

    /// Logical size of the rendered game image
    pub fn rendered_image_size(&self) -> Size {
        self.target_size
    }

    /// Map a display-area position into target pixel coordinates, or `None`
    /// when it lies outside the game image
    pub fn display_to_target(&self, pos: Vec2) -> Option<Vec2> {
        let rect = self.rendered_viewport();
        if rect.is_empty() {
            return None;
        }
        let local = (pos - rect.pos()) / rect.size();
        if local.x < 0.0 || local.y < 0.0 || local.x >= 1.0 || local.y >= 1.0 {
            return None;
        }
        Some(local * self.target_size.as_vec2())
    }

    // === Size and mode ===

    /// Set the target size, notifying the host when it changes
    pub fn set_target_size(&mut self, size: Size) {
        if self.target_size == size {
            return;
        }
        debug!("Target size {} -> {}", self.target_size, size);
        self.target_size = size;
        self.refresh_size_ui();
        self.host.request_redraw();
    }

    /// Switch size mode and apply it
    pub fn set_mode(&mut self, mode: SizeMode) {
        if self.mode != mode {
            debug!("Size mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.apply_mode();
    }

    /// Bring the target size in line with the current mode
    pub fn apply_mode(&mut self) {
        let size = match self.mode {
            SizeMode::Fixed(size) => size,
            SizeMode::MatchDisplayArea => self.display_area,
            SizeMode::MatchExternalTarget => self.external.game_target_size(),
        };
        self.set_target_size(size);
        // the hint depends on the mode even when the size didn't move
        self.refresh_size_ui();
    }

    /// Host display area was resized
    pub fn on_display_area_changed(&mut self, area: Size) {
        self.display_area = area;
        if self.mode == SizeMode::MatchDisplayArea {
            self.set_target_size(area);
        } else {
            self.refresh_size_ui();
        }
        self.host.request_redraw();
    }

    /// External game size configuration changed
    pub fn on_external_target_changed(&mut self, external: ExternalTarget) {
        self.external = external;
        if self.mode == SizeMode::MatchExternalTarget {
            self.set_target_size(external.game_target_size());
        }
        self.host.request_redraw();
    }

    /// Commit user-entered width and height text as a fixed size
    ///
    /// Unparseable components keep their current value; results are
    /// clamped to the supported range.
    pub fn commit_fixed_size(&mut self, width_text: &str, height_text: &str) -> Size {
        let size = parse_size(width_text, height_text, self.target_size);
        self.set_mode(SizeMode::Fixed(size));
        size
    }

    /// Use a specific fixed size, clamped to the supported range
    pub fn select_fixed_size(&mut self, size: Size) {
        let size = clamp_size(size.width as i64, size.height as i64);
        self.set_mode(SizeMode::Fixed(size));
    }

    /// Remember the current fixed size; call when the view gains focus
    pub fn record_recent_size(&mut self) {
        if self.mode.is_fixed() {
            self.recent.record(self.target_size);
        }
    }

    pub fn resolution_choices(&self) -> Vec<ResolutionChoice> {
        resolution_choices(&self.mode, self.target_size, &self.recent)
    }

    pub fn choose(&mut self, action: ResolutionAction) {
        match action {
            ResolutionAction::MatchDisplayArea => self.set_mode(SizeMode::MatchDisplayArea),
            ResolutionAction::MatchExternalTarget => self.set_mode(SizeMode::MatchExternalTarget),
            ResolutionAction::Fixed(size) => self.select_fixed_size(size),
        }
    }

    fn refresh_size_ui(&self) {
        self.host.target_size_changed(self.target_size, self.size_hint());
    }

    // === Lifecycle ===

    /// View became active: apply the (possibly freshly loaded) mode
    pub fn activate(&mut self) {
        self.apply_mode();
    }

    /// View became inactive: free graphics resources
    pub fn deactivate(&mut self) {
        self.release_offscreen();
        self.last_path = None;
    }

    /// The one place the offscreen buffer is freed
    fn release_offscreen(&mut self) {
        self.offscreen.release(&mut self.backend);
    }

    // === Rendering ===

    /// Plan for the next frame given current state
    pub fn plan(&self) -> FramePlan {
        plan_frame(self.target_size, self.display_area, &self.external)
    }

    /// Render one frame into the display area
    ///
    /// Returns the plan that was executed, or `None` when the display area
    /// is empty and nothing was drawn.
    pub fn render_frame(&mut self) -> Result<Option<FramePlan>> {
        if self.display_area.is_empty() {
            trace!("Display area empty, skipping frame");
            return Ok(None);
        }

        let plan = self.plan();
        self.backend.begin_frame(self.display_area)?;
        self.backend.clear(Rect::from_size(self.display_area), Color::VOID)?;

        match plan.path {
            // degenerate target, e.g. a zero-width game window: nothing to draw
            _ if plan.target_size.is_empty() => self.release_offscreen(),
            RenderPath::Buffered => {
                let target = self.offscreen.ensure_sized(&mut self.backend, plan.target_size)?;
                self.backend
                    .render_scene(Some(target), plan.scene_viewport, plan.image_size)?;
                self.backend.blit(target, plan.window_rect)?;
            }
            RenderPath::Direct => {
                self.release_offscreen();
                self.backend.clear(plan.window_rect, Color::BLACK)?;
                self.backend
                    .render_scene(None, plan.scene_viewport, plan.image_size)?;
            }
        }

        self.backend.end_frame()?;

        if self.last_path != Some(plan.path) {
            debug!(
                "Render path now {:?} ({} in {})",
                plan.path, plan.target_size, plan.display_area
            );
        }
        self.last_path = Some(plan.path);
        Ok(Some(plan))
    }

    // === Persistence ===

    /// Encode mode, size and recent sizes as a settings tree
    pub fn save_settings(&self) -> Result<Value> {
        PersistedView {
            mode: self.mode,
            target_size: self.target_size,
            recent: self.recent.clone(),
        }
        .save()
    }

    /// Load persisted settings; takes effect on the next `activate`
    pub fn load_settings(&mut self, node: &Value) {
        let mut view = PersistedView {
            mode: self.mode,
            target_size: self.target_size,
            recent: self.recent.clone(),
        };
        view.load(node);

        self.mode = view.mode;
        self.target_size = view.target_size;
        self.recent = view.recent;
    }
}

impl<B: GraphicsBackend, H: ViewHost> Drop for ViewportRenderer<B, H> {
    fn drop(&mut self) {
        self.release_offscreen();
    }
}
