use rand::{Rng, RngCore};

// Seeded pseudo-random stream consumed by every generation stage.
// Stages take `&mut dyn RandomStream` so one stream can be threaded
// through several stages, each advancing it in turn.
pub trait RandomStream {
    // Uniform integer in [0, max). Returns 0 when max == 0.
    fn next_below(&mut self, max: i32) -> i32;

    // Uniform integer in [min, max). Returns min when min == max.
    fn next_in_range(&mut self, min: i32, max: i32) -> i32;

    // Uniform float in [0.0, 1.0)
    fn next_f64(&mut self) -> f64;
}

const MBIG: i32 = i32::MAX;
const MSEED: i32 = 161_803_398;

// Knuth's subtractive generator, laid out exactly like the classic seeded
// `Random(int)` of the .NET runtime so a seed reproduces the same worlds.
#[derive(Clone)]
pub struct LegacyRandom {
    seed_array: [i32; 56],
    inext: usize,
    inextp: usize,
}

impl LegacyRandom {
    pub fn new(seed: i32) -> Self {
        // |i32::MIN| does not fit, it is clamped to i32::MAX
        let subtraction = if seed == i32::MIN {
            i32::MAX
        } else {
            seed.abs()
        };
        let mut seed_array = [0i32; 56];
        let mut mj = MSEED.wrapping_sub(subtraction);
        seed_array[55] = mj;
        let mut mk = 1i32;

        // Spread the initial values across the table in a 21-step stride
        for i in 1..55 {
            let ii = (21 * i) % 55;
            seed_array[ii] = mk;
            mk = mj.wrapping_sub(mk);
            if mk < 0 {
                mk = mk.wrapping_add(MBIG);
            }
            mj = seed_array[ii];
        }

        // Warm up the table with four mixing passes
        for _ in 1..5 {
            for i in 1..56 {
                seed_array[i] = seed_array[i].wrapping_sub(seed_array[1 + (i + 30) % 55]);
                if seed_array[i] < 0 {
                    seed_array[i] = seed_array[i].wrapping_add(MBIG);
                }
            }
        }

        Self {
            seed_array,
            inext: 0,
            inextp: 21,
        }
    }

    // Raw sample in [0, i32::MAX)
    pub fn next_raw(&mut self) -> i32 {
        let mut loc_inext = self.inext + 1;
        if loc_inext >= 56 {
            loc_inext = 1;
        }
        let mut loc_inextp = self.inextp + 1;
        if loc_inextp >= 56 {
            loc_inextp = 1;
        }

        let mut ret = self.seed_array[loc_inext].wrapping_sub(self.seed_array[loc_inextp]);
        if ret == MBIG {
            ret -= 1;
        }
        if ret < 0 {
            ret = ret.wrapping_add(MBIG);
        }

        self.seed_array[loc_inext] = ret;
        self.inext = loc_inext;
        self.inextp = loc_inextp;
        ret
    }

    #[inline]
    fn sample(&mut self) -> f64 {
        // Multiply by the reciprocal rather than divide: matches the reference bit for bit
        f64::from(self.next_raw()) * (1.0 / f64::from(MBIG))
    }

    // Sample for ranges wider than i32::MAX
    fn sample_large_range(&mut self) -> f64 {
        let mut result = self.next_raw();
        if self.next_raw() % 2 == 0 {
            result = -result;
        }
        let d = f64::from(result) + f64::from(MBIG - 1);
        d / (2.0 * f64::from(MBIG) - 1.0)
    }
}

impl RandomStream for LegacyRandom {
    fn next_below(&mut self, max: i32) -> i32 {
        debug_assert!(max >= 0, "next_below bound must be non-negative");
        (self.sample() * f64::from(max)) as i32
    }

    fn next_in_range(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "next_in_range requires min <= max");
        let range = i64::from(max) - i64::from(min);
        if range <= i64::from(i32::MAX) {
            (self.sample() * range as f64) as i32 + min
        } else {
            ((self.sample_large_range() * range as f64) as i64 + i64::from(min)) as i32
        }
    }

    fn next_f64(&mut self) -> f64 {
        self.sample()
    }
}

// Adapter letting any `rand` generator drive the stages,
// e.g. `RandStream::new(ChaCha8Rng::seed_from_u64(7))`.
// Outputs are deterministic per seed but differ from LegacyRandom.
pub struct RandStream<R: RngCore>(R);

impl<R: RngCore> RandStream<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: RngCore> RandomStream for RandStream<R> {
    fn next_below(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        self.0.gen_range(0..max)
    }

    fn next_in_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.0.gen_range(min..max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// Fresh seed for runs that were not given one
pub fn random_seed() -> i32 {
    rand::random::<i32>()
}
