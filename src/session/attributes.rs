//! Persistence of the session configuration as named string attributes, the form in which a host
//! scene saves and restores node parameters.

use super::{CollectMode, SessionConfig};
use crate::errors::CollectError;
use log::warn;
use std::str::FromStr;

pub const ATTR_LABEL_BASE: &str = "LabelBase";
pub const ATTR_LABEL_COUNTER: &str = "LabelCounter";
pub const ATTR_MINIMUM_DISTANCE_MM: &str = "MinimumDistanceMm";
pub const ATTR_COLLECT_MODE: &str = "CollectMode";

/// Parse a collect mode literal, falling back to manual collection if it isn't recognized.
pub(super) fn mode_or_manual(literal: &str) -> CollectMode {
    CollectMode::from_str(literal).unwrap_or_else(|e| {
        warn!("{e}, setting to manual");
        CollectMode::Manual
    })
}

fn parse_or_keep<T: FromStr>(
    name: &str,
    value: &str,
    target: &mut T,
    accept: impl Fn(&T) -> bool,
    issues: &mut Vec<CollectError>,
) {
    match value.trim().parse::<T>() {
        Ok(v) if accept(&v) => *target = v,
        _ => {
            warn!("Could not parse {name}=\"{value}\", keeping the previous value");
            issues.push(CollectError::InvalidAttribute {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }
}

impl SessionConfig {
    /// Write the configuration as (name, value) attribute pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointcollect::SessionConfig;
    /// let attributes = SessionConfig::default().to_attributes();
    /// assert_eq!(attributes[3], ("CollectMode", "manual".to_string()));
    /// ```
    pub fn to_attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            (ATTR_LABEL_BASE, self.label_base.clone()),
            (ATTR_LABEL_COUNTER, self.label_counter.to_string()),
            (ATTR_MINIMUM_DISTANCE_MM, self.minimum_distance_mm.to_string()),
            (ATTR_COLLECT_MODE, self.collect_mode.as_str().to_string()),
        ]
    }

    /// Restore configuration values from (name, value) attribute pairs. Attributes which are not
    /// part of the configuration are ignored, and attributes which are absent leave their field
    /// unchanged.
    ///
    /// Restoring never fails as a whole. A numeric attribute which can't be parsed, or a minimum
    /// distance which isn't finite, keeps its previous value, and an unrecognized collect mode literal sets the mode to manual. Each of
    /// these is logged and returned so the caller can report them.
    ///
    /// # Arguments
    ///
    /// * `attributes`: the attribute pairs, in any order
    ///
    /// returns: Vec<CollectError, Global>
    pub fn read_attributes<'a, I>(&mut self, attributes: I) -> Vec<CollectError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut issues = Vec::new();
        for (name, value) in attributes {
            match name {
                ATTR_LABEL_BASE => self.label_base = value.to_string(),
                ATTR_LABEL_COUNTER => {
                    parse_or_keep(name, value, &mut self.label_counter, |_| true, &mut issues)
                }
                ATTR_MINIMUM_DISTANCE_MM => parse_or_keep(
                    name,
                    value,
                    &mut self.minimum_distance_mm,
                    |d: &f64| d.is_finite(),
                    &mut issues,
                ),
                ATTR_COLLECT_MODE => match CollectMode::from_str(value) {
                    Ok(mode) => self.collect_mode = mode,
                    Err(e) => {
                        self.collect_mode = mode_or_manual(value);
                        issues.push(e);
                    }
                },
                _ => {}
            }
        }

        issues
    }
}
