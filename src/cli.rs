// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::core::{parse_size, ExternalTarget, SizeMode};
use crate::math::{Size, TargetResize};

#[derive(Parser, Debug, Clone)]
#[command(name = "game-view")]
#[command(about = "Adaptive game viewport", long_about = None)]
pub struct Cli {
    /// Initial size mode; overrides the saved one
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Fixed render width (used with --mode fixed)
    #[arg(long, default_value = "1280")]
    pub width: String,

    /// Fixed render height (used with --mode fixed)
    #[arg(long, default_value = "720")]
    pub height: String,

    /// Size of the external game window
    #[arg(long = "game-width", default_value_t = 1920)]
    pub game_width: u32,

    #[arg(long = "game-height", default_value_t = 1080)]
    pub game_height: u32,

    /// Render size the game forces, independent of its window
    #[arg(long = "forced-width", default_value_t = 0)]
    pub forced_width: u32,

    #[arg(long = "forced-height", default_value_t = 0)]
    pub forced_height: u32,

    /// How a forced render size is fitted into the game window
    #[arg(long = "forced-resize", value_enum, default_value_t = ResizeArg::Fit)]
    pub forced_resize: ResizeArg,

    /// Settings file
    #[arg(long, default_value = "game-view.json")]
    pub settings: PathBuf,

    /// Name of the view inside the settings file
    #[arg(long, default_value = "GameView")]
    pub view: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Fixed,
    Display,
    Game,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeArg {
    None,
    Stretch,
    Fit,
    Fill,
}

impl From<ResizeArg> for TargetResize {
    fn from(arg: ResizeArg) -> Self {
        match arg {
            ResizeArg::None => TargetResize::None,
            ResizeArg::Stretch => TargetResize::Stretch,
            ResizeArg::Fit => TargetResize::Fit,
            ResizeArg::Fill => TargetResize::Fill,
        }
    }
}

impl Cli {
    /// Size mode requested on the command line, if any
    pub fn size_mode(&self, current: Size) -> Option<SizeMode> {
        self.mode.map(|mode| match mode {
            ModeArg::Fixed => SizeMode::Fixed(parse_size(&self.width, &self.height, current)),
            ModeArg::Display => SizeMode::MatchDisplayArea,
            ModeArg::Game => SizeMode::MatchExternalTarget,
        })
    }

    pub fn external_target(&self) -> ExternalTarget {
        ExternalTarget::new(Size::new(self.game_width, self.game_height)).with_forced_render_size(
            Size::new(self.forced_width, self.forced_height),
            self.forced_resize.into(),
        )
    }
}
