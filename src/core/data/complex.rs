use std::ops::{Add, Mul};

macro_rules! complex_type {
    ($name:ident, $float:ty) => {
        #[derive(Debug, Copy, Clone, PartialEq)]
        pub struct $name {
            pub real: $float,
            pub imag: $float,
        }

        impl $name {
            #[must_use]
            pub const fn new(real: $float, imag: $float) -> Self {
                Self { real, imag }
            }

            #[must_use]
            pub fn magnitude_squared(&self) -> $float {
                self.real * self.real + self.imag * self.imag
            }

            /// Modulus computed entirely in this type's precision.
            ///
            /// Divides by the larger component before squaring so that neither
            /// component can overflow, then scales back.
            #[must_use]
            pub fn magnitude(&self) -> $float {
                if self.real.is_nan() || self.imag.is_nan() {
                    return <$float>::NAN;
                }

                if self.real.is_infinite() || self.imag.is_infinite() {
                    return <$float>::INFINITY;
                }

                let a = self.real.abs();
                let b = self.imag.abs();

                if a > b {
                    let ratio = b / a;
                    return a * (1.0 + ratio * ratio).sqrt();
                }

                if a == 0.0 {
                    return b;
                }

                let ratio = a / b;
                b * (1.0 + ratio * ratio).sqrt()
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                Self {
                    real: self.real + other.real,
                    imag: self.imag + other.imag,
                }
            }
        }

        impl Mul for $name {
            type Output = Self;

            fn mul(self, other: Self) -> Self {
                Self {
                    real: self.real * other.real - self.imag * other.imag,
                    imag: self.real * other.imag + self.imag * other.real,
                }
            }
        }
    };
}

complex_type!(Complex, f64);
complex_type!(Complex32, f32);
