use anyhow::Result;
use tracing_subscriber::fmt::time::OffsetTime;

pub mod colour;
pub mod linalg;

pub mod gb_float {
    use num_traits::Zero;

    /// Collapses -0.0 to 0.0 so displayed and rendered values never show a
    /// negative zero.
    pub fn force_positive_zero(x: f64) -> f64 {
        if x.is_zero() { 0.0 } else { x }
    }

    /// log_base(x) for an arbitrary base.
    pub fn log_base(x: f64, base: f64) -> f64 {
        x.ln() / base.ln()
    }
}

/// Initialises tracing output to stderr with source locations and
/// microsecond timestamps. Call once, from the binary entry point.
pub fn setup_log() -> Result<()> {
    let timer = OffsetTime::new(
        time::UtcOffset::UTC,
        time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:6]"),
    );
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_source_location(true)
                .with_timer(timer),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init tracing: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::gb_float;

    #[test]
    fn force_positive_zero_rewrites_negative_zero() {
        assert_eq!(gb_float::force_positive_zero(-0.0).to_bits(), 0.0_f64.to_bits());
        assert_eq!(gb_float::force_positive_zero(-1.5), -1.5);
    }

    #[test]
    fn log_base_matches_powers() {
        assert!((gb_float::log_base(25.0, 5.0) - 2.0).abs() < 1e-12);
        assert!((gb_float::log_base(1.0, 5.0)).abs() < 1e-12);
        assert!((gb_float::log_base(0.2, 5.0) + 1.0).abs() < 1e-12);
    }
}
