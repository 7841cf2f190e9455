//! Generic fixed-step 4th-order Runge-Kutta integration.

/// A system of `N` ordinary differential equations, integrable by
/// [`rk4_step`]. The integrator never inspects the meaning of the state
/// variables; it only needs the current state and the derivative function.
pub trait OdeSystem<const N: usize> {
    /// Current values of the dependent variables.
    fn state(&self) -> [f64; N];

    /// Derivatives of the dependent variables at `time` for the given state.
    fn derivative(&self, time: f64, state: [f64; N]) -> [f64; N];
}

/// Estimate the state at `time + dt` using one classical RK4 step.
///
/// Fixed step only; the caller picks `dt` from its update cadence. Stateless,
/// so a single call site can serve any number of systems. NaN or infinite
/// derivative output passes through unchanged and must be guarded by the
/// system itself.
pub fn rk4_step<const N: usize>(system: &impl OdeSystem<N>, time: f64, dt: f64) -> [f64; N] {
    let y = system.state();
    let half_time = time + dt / 2.0;

    let k1 = system.derivative(time, y);
    let mut mid = [0.0; N];
    for i in 0..N {
        mid[i] = y[i] + dt * k1[i] / 2.0;
    }
    let k2 = system.derivative(half_time, mid);
    for i in 0..N {
        mid[i] = y[i] + dt * k2[i] / 2.0;
    }
    let k3 = system.derivative(half_time, mid);
    for i in 0..N {
        mid[i] = y[i] + dt * k3[i];
    }
    let k4 = system.derivative(time + dt, mid);

    let mut next = [0.0; N];
    for i in 0..N {
        next[i] = y[i] + dt * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dy/dt = -k * y, analytic solution y(t) = y0 * exp(-k * t).
    struct Decay {
        y: f64,
        k: f64,
    }

    impl OdeSystem<1> for Decay {
        fn state(&self) -> [f64; 1] {
            [self.y]
        }

        fn derivative(&self, _time: f64, state: [f64; 1]) -> [f64; 1] {
            [-self.k * state[0]]
        }
    }

    /// Undamped oscillator: x'' = -x, as the first-order pair (x, v).
    struct Oscillator {
        x: f64,
        v: f64,
    }

    impl OdeSystem<2> for Oscillator {
        fn state(&self) -> [f64; 2] {
            [self.x, self.v]
        }

        fn derivative(&self, _time: f64, state: [f64; 2]) -> [f64; 2] {
            [state[1], -state[0]]
        }
    }

    #[test]
    fn matches_exponential_decay() {
        let dt = 0.01;
        let system = Decay { y: 1.0, k: 1.0 };
        let next = rk4_step(&system, 0.0, dt);
        let exact = (-dt).exp();
        assert!(
            (next[0] - exact).abs() < 1e-6,
            "rk4 {} vs analytic {}",
            next[0],
            exact
        );
    }

    #[test]
    fn decay_stays_accurate_over_many_steps() {
        let dt = 0.01;
        let mut system = Decay { y: 1.0, k: 1.0 };
        for _ in 0..100 {
            system.y = rk4_step(&system, 0.0, dt)[0];
        }
        let exact = (-1.0f64).exp();
        assert!((system.y - exact).abs() < 1e-6);
    }

    #[test]
    fn oscillator_follows_cosine() {
        let dt = 0.01;
        let mut system = Oscillator { x: 1.0, v: 0.0 };
        for _ in 0..100 {
            let next = rk4_step(&system, 0.0, dt);
            system.x = next[0];
            system.v = next[1];
        }
        // After t = 1: x = cos(1), v = -sin(1).
        assert!((system.x - 1.0f64.cos()).abs() < 1e-6);
        assert!((system.v + 1.0f64.sin()).abs() < 1e-6);
    }

    #[test]
    fn zero_dt_is_identity() {
        let system = Decay { y: 3.5, k: 2.0 };
        let next = rk4_step(&system, 0.0, 0.0);
        assert_eq!(next[0], 3.5);
    }
}
