//! Rising-edge alert decision.
//!
//! Pure function of (price, config, armed). Hysteresis lives entirely in the
//! armed flag; there is no notion of time here.

use monitor_core::AlertConfig;

/// Result of evaluating one price sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// True only on a rising edge.
    pub should_notify: bool,
    /// Armed flag to store after this sample.
    pub armed: bool,
    /// Alert text; empty unless `should_notify`.
    pub message: String,
}

/// Format the alert body for a triggered config.
pub fn format_alert(price: f64, config: &AlertConfig) -> String {
    format!(
        "Current price: ${:.2} {} target ${:.2}",
        price,
        config.direction.symbol(),
        config.threshold
    )
}

/// Decide whether `price` should raise an alert.
pub fn evaluate(price: f64, config: &AlertConfig, armed: bool) -> Evaluation {
    if !config.is_triggered(price) {
        return Evaluation {
            should_notify: false,
            armed: false,
            message: String::new(),
        };
    }

    if armed {
        return Evaluation {
            should_notify: false,
            armed: true,
            message: String::new(),
        };
    }

    Evaluation {
        should_notify: true,
        armed: true,
        message: format_alert(price, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_core::Direction;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn above(threshold: f64) -> AlertConfig {
        AlertConfig::new(threshold, Duration::from_secs(300), Direction::AboveOrEqual)
    }

    fn below(threshold: f64) -> AlertConfig {
        AlertConfig::new(threshold, Duration::from_secs(300), Direction::BelowOrEqual)
    }

    /// Feed a price series through `evaluate`, returning how many alerts fired.
    fn count_alerts(prices: &[f64], config: &AlertConfig) -> usize {
        let mut armed = false;
        let mut fired = 0;
        for &price in prices {
            let eval = evaluate(price, config, armed);
            armed = eval.armed;
            if eval.should_notify {
                fired += 1;
            }
        }
        fired
    }

    #[test]
    fn test_first_crossing_notifies() {
        let eval = evaluate(66_000.0, &above(65_900.0), false);
        assert_eq!(
            eval,
            Evaluation {
                should_notify: true,
                armed: true,
                message: "Current price: $66000.00 ≥ target $65900.00".to_string(),
            }
        );
    }

    #[test]
    fn test_already_armed_is_silent() {
        let eval = evaluate(66_000.0, &above(65_900.0), true);
        assert!(!eval.should_notify);
        assert!(eval.armed);
        assert!(eval.message.is_empty());
    }

    #[test]
    fn test_condition_false_disarms() {
        let eval = evaluate(65_000.0, &above(65_900.0), true);
        assert!(!eval.should_notify);
        assert!(!eval.armed);

        let eval = evaluate(65_000.0, &above(65_900.0), false);
        assert!(!eval.armed);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(evaluate(65_900.0, &above(65_900.0), false).should_notify);
        assert!(evaluate(65_900.0, &below(65_900.0), false).should_notify);
    }

    #[test]
    fn test_below_direction_message() {
        let eval = evaluate(59_999.5, &below(60_000.0), false);
        assert!(eval.should_notify);
        assert_eq!(eval.message, "Current price: $59999.50 ≤ target $60000.00");
    }

    #[test]
    fn test_single_crossing_fires_once() {
        let prices = [65_000.0, 65_500.0, 65_899.0, 66_000.0, 66_100.0];
        assert_eq!(count_alerts(&prices, &above(65_900.0)), 1);
    }

    #[test]
    fn test_continuous_streak_fires_once() {
        let prices = [66_000.0; 10];
        assert_eq!(count_alerts(&prices, &above(65_900.0)), 1);
    }

    #[test]
    fn test_recrossing_fires_again() {
        let prices = [66_000.0, 66_500.0, 65_000.0, 66_000.0, 66_200.0, 65_100.0, 67_000.0];
        assert_eq!(count_alerts(&prices, &above(65_900.0)), 3);
    }

    #[test]
    fn test_never_crossing_is_silent() {
        let prices = [61_000.0, 62_000.0, 63_000.0];
        assert_eq!(count_alerts(&prices, &above(65_900.0)), 0);
        assert_eq!(count_alerts(&prices, &below(60_000.0)), 0);
    }
}
