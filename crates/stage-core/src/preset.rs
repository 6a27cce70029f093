use crate::error::{Result, StageError};

/// Named vector of per-source target levels on the 0..100 scale.
#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub name: String,
    pub values: Vec<f32>,
}

impl Preset {
    pub fn new(name: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Parse a comma separated list such as `"100,0,0,0,0,0,100"`.
    pub fn parse(name: impl Into<String>, list: &str) -> Result<Self> {
        let values = list
            .split(',')
            .enumerate()
            .map(|(position, raw)| {
                let raw = raw.trim();
                raw.parse::<f32>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| StageError::InvalidPreset {
                        position,
                        value: raw.to_string(),
                    })
            })
            .collect::<Result<Vec<f32>>>()?;
        Ok(Self::new(name, values))
    }
}
