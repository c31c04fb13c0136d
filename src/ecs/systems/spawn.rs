/// Accumulate `dt_ms` and report whether a spawn is due. A due timer
/// restarts from zero; any overshoot is dropped rather than carried.
pub fn advance(timer: &mut f32, dt_ms: f32, interval_ms: f32) -> bool {
    *timer += dt_ms;
    if *timer >= interval_ms {
        *timer = 0.0;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_and_drops_overshoot() {
        let mut timer = 0.0;
        assert!(!advance(&mut timer, 4990.0, 5000.0));
        assert!(advance(&mut timer, 30.0, 5000.0));
        assert_eq!(timer, 0.0);
        assert!(!advance(&mut timer, 20.0, 5000.0));
        assert_eq!(timer, 20.0);
    }

    #[test]
    fn exact_interval_fires() {
        let mut timer = 0.0;
        assert!(advance(&mut timer, 5000.0, 5000.0));
        assert_eq!(timer, 0.0);
    }
}
