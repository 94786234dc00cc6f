use std::str::FromStr;

/// Process-wide performance knobs, fixed at startup.
#[derive(Clone, Copy, Debug)]
pub struct PerfConfig {
    pub max_instances: usize,
    pub is_mobile: bool,
    pub resolution_scale: f64,
    pub render_budget_ms: f64,
    pub target_fps: f64,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            max_instances: 8,
            is_mobile: false,
            resolution_scale: crate::constants::RESOLUTION_SCALE,
            render_budget_ms: crate::constants::RENDER_BUDGET_MS,
            target_fps: 30.0,
        }
    }
}

impl PerfConfig {
    /// Minimum interval between accepted global ticks, floored to whole ms.
    pub fn min_tick_interval_ms(&self) -> f64 {
        (1000.0 / self.target_fps).floor()
    }

    /// `max_instances` is a sizing hint, not a cap. Initialization never
    /// refuses a container; past the hint the tick budget is the only thing
    /// bounding per-frame cost, which is worth a warning.
    pub fn over_instance_hint(&self, built: usize) -> bool {
        built >= self.max_instances
    }
}

/// Named width presets supplying default column count, width variation and
/// distortion amplitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthPreset {
    Balanced,
    Extremes,
    Minimal,
    Dense,
}

pub struct PresetDefaults {
    pub columns: u32,
    pub width_variation: f64,
    pub distortion: f32,
}

impl WidthPreset {
    pub fn defaults(self) -> PresetDefaults {
        match self {
            WidthPreset::Balanced => PresetDefaults {
                columns: 5,
                width_variation: 1.0,
                distortion: 0.2,
            },
            WidthPreset::Extremes => PresetDefaults {
                columns: 4,
                width_variation: 1.8,
                distortion: 0.15,
            },
            WidthPreset::Minimal => PresetDefaults {
                columns: 3,
                width_variation: 1.5,
                distortion: 0.1,
            },
            WidthPreset::Dense => PresetDefaults {
                columns: 7,
                width_variation: 0.8,
                distortion: 0.25,
            },
        }
    }
}

impl FromStr for WidthPreset {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balanced" => Ok(WidthPreset::Balanced),
            "extremes" => Ok(WidthPreset::Extremes),
            "minimal" => Ok(WidthPreset::Minimal),
            "dense" => Ok(WidthPreset::Dense),
            _ => Err(()),
        }
    }
}

/// How the blobs react to the pointer while hovering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerMode {
    /// Blob 1 chases the pointer; blobs 2 and 3 chase mirrored positions.
    Follow,
    /// Layered offsets on top of idle drift, alternating sign per blob.
    Parallax,
}

/// Per-container configuration, derived once from element attributes.
#[derive(Clone, Debug)]
pub struct InstanceSettings {
    pub columns: u32,
    pub noise: f32,
    pub distortion: f32,
    pub width_variation: f64,
    pub sensitivity: [f32; 3],
    pub hover_enabled: bool,
    pub pointer_mode: PointerMode,
    pub colors: [[f32; 3]; 3],
    pub sizes: [f32; 3],
    pub use_three_color: bool,
    pub background_url: Option<String>,
    pub seed: u32,
}

pub const DEFAULT_SEED: u32 = 1234;
pub const DEFAULT_SENSITIVITY: [f32; 3] = [0.08, 0.05, 0.1];
pub const DEFAULT_SIZES: [f32; 3] = [0.7, 0.6, 0.65];
pub const DEFAULT_NOISE: f32 = 0.035;
pub const DEFAULT_NOISE_LOW_QUALITY: f32 = 0.015;
pub const DEFAULT_COLORS: [&str; 3] = ["#5983f8", "#c1ff5b", "#ffff5b"];

impl InstanceSettings {
    /// Resolve a preset plus attribute overrides into concrete settings.
    ///
    /// `attr` reads one named attribute off the container (string-typed,
    /// absent when unset). Unrecognized or unparsable values fall back to
    /// the preset or hardcoded default; nothing is required.
    pub fn from_attributes<F>(attr: F, low_quality: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let preset = attr("data-width-preset")
            .and_then(|s| s.parse::<WidthPreset>().ok())
            .unwrap_or(WidthPreset::Balanced);
        let defaults = preset.defaults();

        let default_noise = if low_quality {
            DEFAULT_NOISE_LOW_QUALITY
        } else {
            DEFAULT_NOISE
        };

        Self {
            columns: parse_attr(&attr, "data-columns")
                .filter(|&c| c > 0)
                .unwrap_or(defaults.columns),
            noise: parse_attr(&attr, "data-noise").unwrap_or(default_noise),
            distortion: parse_attr(&attr, "data-distortion").unwrap_or(defaults.distortion),
            width_variation: parse_attr(&attr, "data-width-variation")
                .unwrap_or(defaults.width_variation),
            sensitivity: [
                parse_attr(&attr, "data-sensitivity-one").unwrap_or(DEFAULT_SENSITIVITY[0]),
                parse_attr(&attr, "data-sensitivity-two").unwrap_or(DEFAULT_SENSITIVITY[1]),
                parse_attr(&attr, "data-sensitivity-three").unwrap_or(DEFAULT_SENSITIVITY[2]),
            ],
            hover_enabled: attr("data-hover").as_deref() != Some("false"),
            pointer_mode: match attr("data-pointer-mode").as_deref() {
                Some("parallax") => PointerMode::Parallax,
                _ => PointerMode::Follow,
            },
            colors: [
                color_attr(&attr, "data-color-one", DEFAULT_COLORS[0]),
                color_attr(&attr, "data-color-two", DEFAULT_COLORS[1]),
                color_attr(&attr, "data-color-three", DEFAULT_COLORS[2]),
            ],
            sizes: [
                parse_attr(&attr, "data-size-one").unwrap_or(DEFAULT_SIZES[0]),
                parse_attr(&attr, "data-size-two").unwrap_or(DEFAULT_SIZES[1]),
                parse_attr(&attr, "data-size-three").unwrap_or(DEFAULT_SIZES[2]),
            ],
            use_three_color: attr("data-use-three-color").as_deref() == Some("true"),
            background_url: attr("data-background").filter(|s| !s.is_empty()),
            seed: parse_attr(&attr, "data-seed").unwrap_or(DEFAULT_SEED),
        }
    }
}

fn parse_attr<F, T>(attr: &F, name: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    attr(name).and_then(|s| s.trim().parse::<T>().ok())
}

fn color_attr<F>(attr: &F, name: &str, default: &str) -> [f32; 3]
where
    F: Fn(&str) -> Option<String>,
{
    attr(name)
        .and_then(|s| parse_hex_color(&s))
        .unwrap_or_else(|| parse_hex_color(default).unwrap_or([1.0, 1.0, 1.0]))
}

/// Parse a `#rrggbb` hex string into linear-ish [0,1] RGB.
pub fn parse_hex_color(s: &str) -> Option<[f32; 3]> {
    let hex = s.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}
