//! Luminance targeting
//!
//! Bisection along a two-color gradient in gamma-encoded sRGB until the
//! midpoint's WCAG luminance is within epsilon of the target. The search is an
//! approximation: when the iteration budget runs out the last midpoint is
//! returned as a best-effort result.

use log::{debug, trace};
use serde::Serialize;

use super::analysis::ColorAnalyzer;
use super::space::Colorspace;
use super::token::ColorToken;
use crate::config::LuminanceSearchConfig;
use crate::constants::luminance_search::{EPSILON, MAX_ITERATIONS};

/// Result of one luminance search
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Last midpoint, as an sRGB token
    pub token: ColorToken,
    /// Luminance of `token`
    pub luminance: f64,
    /// Midpoints evaluated, at least 1
    pub iterations: u32,
    /// Whether `luminance` landed within epsilon of the target
    pub converged: bool,
}

/// Bounded bisection search for a target luminance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminanceSearch {
    epsilon: f64,
    max_iterations: u32,
}

impl Default for LuminanceSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl LuminanceSearch {
    pub fn new() -> Self {
        Self {
            epsilon: EPSILON,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Create a search with a custom tolerance and iteration budget (minimum 1)
    pub fn with_params(epsilon: f64, max_iterations: u32) -> Self {
        Self {
            epsilon,
            max_iterations: max_iterations.max(1),
        }
    }

    pub fn from_config(config: &LuminanceSearchConfig) -> Self {
        Self::with_params(config.epsilon, config.max_iterations)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Find a color with luminance `target` between the token and black or white
    ///
    /// # Arguments
    ///
    /// * `token` - Starting color, in any colorspace
    /// * `target` - Desired WCAG relative luminance, clamped into [0, 1]
    ///
    /// # Returns
    ///
    /// The outcome keeps the input alpha. If the token is darker than the
    /// target the gradient runs token→white, otherwise black→token.
    pub fn search(&self, token: &ColorToken, target: f64) -> SearchOutcome {
        let analyzer = ColorAnalyzer::new();
        let rgb = token.to_space(Colorspace::Rgb).with_alpha(1.0);
        let current = analyzer.luminance(&rgb);

        let outcome = if current > target {
            self.search_between(&ColorToken::black(), &rgb, target)
        } else {
            self.search_between(&rgb, &ColorToken::white(), target)
        };
        SearchOutcome {
            token: outcome.token.with_alpha(token.alpha()),
            ..outcome
        }
    }

    /// Bisect the sRGB gradient between two colors
    ///
    /// The endpoints are reordered so the walk runs from darker to lighter.
    /// Alpha is interpolated along with the channels.
    pub fn search_between(&self, from: &ColorToken, to: &ColorToken, target: f64) -> SearchOutcome {
        let analyzer = ColorAnalyzer::new();
        let target = if target.is_nan() {
            0.0
        } else {
            target.clamp(0.0, 1.0)
        };

        let mut low = from.to_space(Colorspace::Rgb);
        let mut high = to.to_space(Colorspace::Rgb);
        if analyzer.luminance(&low) > analyzer.luminance(&high) {
            std::mem::swap(&mut low, &mut high);
        }

        let mut iterations = 0;
        loop {
            iterations += 1;
            let mid = midpoint(&low, &high);
            let luminance = analyzer.luminance(&mid);
            trace!(
                "Luminance search step {}: {} -> {:.9} (target {:.9})",
                iterations,
                mid.to_hex(false),
                luminance,
                target
            );

            let converged = (luminance - target).abs() <= self.epsilon;
            if converged || iterations >= self.max_iterations {
                if !converged {
                    debug!(
                        "Luminance search stopped after {} iterations at {:.9} (target {:.9})",
                        iterations, luminance, target
                    );
                }
                return SearchOutcome {
                    token: mid,
                    luminance,
                    iterations,
                    converged,
                };
            }

            if luminance > target {
                high = mid;
            } else {
                low = mid;
            }
        }
    }
}

fn midpoint(a: &ColorToken, b: &ColorToken) -> ColorToken {
    let [a0, a1, a2] = a.channels();
    let [b0, b1, b2] = b.channels();
    ColorToken::new(
        Colorspace::Rgb,
        [(a0 + b0) / 2.0, (a1 + b1) / 2.0, (a2 + b2) / 2.0],
        (a.alpha() + b.alpha()) / 2.0,
    )
}
