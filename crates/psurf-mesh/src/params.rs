use psurf_core::traits::Validate;
use psurf_core::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// Preset resolutions for callers that do not pick segment counts themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TessellationQuality {
    Low,
    #[default]
    Medium,
    High,
    Ultra,
}

impl TessellationQuality {
    /// `(u_segments, v_segments)` for this preset.
    pub fn segments(self) -> (u32, u32) {
        match self {
            TessellationQuality::Low => (16, 8),
            TessellationQuality::Medium => (32, 16),
            TessellationQuality::High => (64, 32),
            TessellationQuality::Ultra => (128, 64),
        }
    }
}

/// Resolution and closure options for one tessellation call.
///
/// The segment counts are authoritative. `quality` and `max_deviation` are
/// carried for the caller's bookkeeping and do not refine the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TessellationParams {
    pub u_segments: u32,
    pub v_segments: u32,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<TessellationQuality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_deviation: Option<f64>,
}

impl TessellationParams {
    pub fn new(u_segments: u32, v_segments: u32, is_closed: bool) -> Self {
        Self {
            u_segments,
            v_segments,
            is_closed,
            quality: None,
            max_deviation: None,
        }
    }

    pub fn from_quality(quality: TessellationQuality, is_closed: bool) -> Self {
        let (u_segments, v_segments) = quality.segments();
        Self {
            quality: Some(quality),
            ..Self::new(u_segments, v_segments, is_closed)
        }
    }

    pub fn closed(mut self, is_closed: bool) -> Self {
        self.is_closed = is_closed;
        self
    }

    /// Vertices on the `(u+1) x (v+1)` sample grid.
    pub fn grid_vertex_count(&self) -> u64 {
        (u64::from(self.u_segments) + 1) * (u64::from(self.v_segments) + 1)
    }

    /// Upper bound on vertices including two disk caps with their own ring.
    pub fn max_vertex_count(&self) -> u64 {
        self.grid_vertex_count() + 2 * (u64::from(self.u_segments) + 2)
    }
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self::from_quality(TessellationQuality::default(), false)
    }
}

impl Validate for TessellationParams {
    fn validate(&self) -> Result<()> {
        if self.u_segments == 0 || self.v_segments == 0 {
            return Err(KernelError::InvalidArgument(format!(
                "segment counts must be positive, got u={} v={}",
                self.u_segments, self.v_segments
            )));
        }
        if let Some(d) = self.max_deviation {
            if !(d >= 0.0 && d.is_finite()) {
                return Err(KernelError::InvalidArgument(format!(
                    "max deviation must be finite and non-negative, got {d}"
                )));
            }
        }
        if self.max_vertex_count() > u64::from(u32::MAX) {
            return Err(KernelError::OutOfRange(format!(
                "{}x{} grid exceeds the u32 index range",
                self.u_segments, self.v_segments
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_segments() {
        assert!(TessellationParams::new(8, 4, false).validate().is_ok());
        assert!(matches!(
            TessellationParams::new(0, 4, false).validate(),
            Err(KernelError::InvalidArgument(_))
        ));
        assert!(TessellationParams::new(8, 0, true).validate().is_err());
    }

    #[test]
    fn test_validate_max_deviation() {
        let mut p = TessellationParams::new(8, 4, false);
        p.max_deviation = Some(-0.1);
        assert!(p.validate().is_err());
        p.max_deviation = Some(f64::NAN);
        assert!(p.validate().is_err());
        p.max_deviation = Some(0.01);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_index_overflow() {
        let p = TessellationParams::new(u32::MAX, 2, false);
        assert!(matches!(p.validate(), Err(KernelError::OutOfRange(_))));
    }

    #[test]
    fn test_from_quality() {
        let p = TessellationParams::from_quality(TessellationQuality::High, true);
        assert_eq!((p.u_segments, p.v_segments), (64, 32));
        assert!(p.is_closed);
        assert_eq!(p.quality, Some(TessellationQuality::High));
        assert_eq!(TessellationParams::default().u_segments, 32);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let p = TessellationParams::new(16, 8, true);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["uSegments"], 16);
        assert_eq!(json["vSegments"], 8);
        assert_eq!(json["isClosed"], true);
        assert!(json.get("quality").is_none());

        let parsed: TessellationParams =
            serde_json::from_str(r#"{"uSegments": 4, "vSegments": 2, "quality": "ultra"}"#).unwrap();
        assert_eq!(parsed.u_segments, 4);
        assert!(!parsed.is_closed);
        assert_eq!(parsed.quality, Some(TessellationQuality::Ultra));
    }
}
