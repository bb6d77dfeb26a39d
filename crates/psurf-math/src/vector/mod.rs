//! Fixed-arity vectors.
//!
//! `Vector2`, `Vector3` and `Vector4` are distinct value types. The algebra they
//! share (sums, products, lerp, clamping, length) lives once in [`algebra`] as
//! functions over `[f64; N]`; `impl_vector_common!` wires those functions into
//! each concrete type as in-place, chainable methods plus the std operators.

pub(crate) mod algebra {
    pub fn zip<const N: usize>(a: [f64; N], b: [f64; N], f: impl Fn(f64, f64) -> f64) -> [f64; N] {
        let mut out = [0.0; N];
        for i in 0..N {
            out[i] = f(a[i], b[i]);
        }
        out
    }

    pub fn dot<const N: usize>(a: [f64; N], b: [f64; N]) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }

    pub fn length_squared<const N: usize>(a: [f64; N]) -> f64 {
        dot(a, a)
    }

    pub fn distance_squared<const N: usize>(a: [f64; N], b: [f64; N]) -> f64 {
        length_squared(zip(a, b, |x, y| x - y))
    }

    pub fn scale<const N: usize>(a: [f64; N], s: f64) -> [f64; N] {
        a.map(|x| x * s)
    }

    pub fn lerp<const N: usize>(a: [f64; N], b: [f64; N], t: f64) -> [f64; N] {
        zip(a, b, |x, y| x + (y - x) * t)
    }

    pub fn clamp<const N: usize>(a: [f64; N], min: [f64; N], max: [f64; N]) -> [f64; N] {
        let lower = zip(a, min, f64::max);
        zip(lower, max, f64::min)
    }

    pub fn all_close<const N: usize>(a: [f64; N], b: [f64; N], eps: f64) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| psurf_core::tolerance::equals(*x, *y, eps))
    }
}

macro_rules! impl_vector_common {
    ($name:ident, $dim:literal, [$($field:ident),+]) => {
        impl $name {
            pub const DIM: usize = $dim;
            pub const ZERO: Self = Self { $($field: 0.0),+ };
            pub const ONE: Self = Self { $($field: 1.0),+ };

            pub fn splat(value: f64) -> Self {
                Self { $($field: value),+ }
            }

            pub fn to_array(&self) -> [f64; $dim] {
                [$(self.$field),+]
            }

            pub fn from_components(components: [f64; $dim]) -> Self {
                let [$($field),+] = components;
                Self { $($field),+ }
            }

            pub fn set_components(&mut self, components: [f64; $dim]) -> &mut Self {
                *self = Self::from_components(components);
                self
            }

            /// Read `DIM` components starting at `offset`.
            pub fn from_array(array: &[f64], offset: usize) -> psurf_core::Result<Self> {
                psurf_core::error::ensure_len(array.len(), offset + $dim)?;
                let mut components = [0.0; $dim];
                components.copy_from_slice(&array[offset..offset + $dim]);
                Ok(Self::from_components(components))
            }

            /// Write `DIM` components starting at `offset`.
            pub fn write_to_array(&self, array: &mut [f64], offset: usize) -> psurf_core::Result<()> {
                psurf_core::error::ensure_len(array.len(), offset + $dim)?;
                array[offset..offset + $dim].copy_from_slice(&self.to_array());
                Ok(())
            }

            pub fn copy(&mut self, other: &Self) -> &mut Self {
                *self = *other;
                self
            }

            pub fn add_vector(&mut self, other: &Self) -> &mut Self {
                let c = $crate::vector::algebra::zip(self.to_array(), other.to_array(), |a, b| a + b);
                self.set_components(c)
            }

            pub fn add_scaled_vector(&mut self, other: &Self, s: f64) -> &mut Self {
                let c = $crate::vector::algebra::zip(self.to_array(), other.to_array(), |a, b| a + b * s);
                self.set_components(c)
            }

            pub fn sub_vector(&mut self, other: &Self) -> &mut Self {
                let c = $crate::vector::algebra::zip(self.to_array(), other.to_array(), |a, b| a - b);
                self.set_components(c)
            }

            /// Component-wise product.
            pub fn multiply_vector(&mut self, other: &Self) -> &mut Self {
                let c = $crate::vector::algebra::zip(self.to_array(), other.to_array(), |a, b| a * b);
                self.set_components(c)
            }

            /// Component-wise quotient.
            pub fn divide_vector(&mut self, other: &Self) -> &mut Self {
                let c = $crate::vector::algebra::zip(self.to_array(), other.to_array(), |a, b| a / b);
                self.set_components(c)
            }

            pub fn add_scalar(&mut self, s: f64) -> &mut Self {
                let c = self.to_array().map(|a| a + s);
                self.set_components(c)
            }

            pub fn multiply_scalar(&mut self, s: f64) -> &mut Self {
                let c = $crate::vector::algebra::scale(self.to_array(), s);
                self.set_components(c)
            }

            /// Divide by `s`; a zero divisor leaves the vector unchanged.
            pub fn divide_scalar(&mut self, s: f64) -> &mut Self {
                if s == 0.0 {
                    log::warn!("{}::divide_scalar by zero ignored", stringify!($name));
                    return self;
                }
                self.multiply_scalar(1.0 / s)
            }

            pub fn negate(&mut self) -> &mut Self {
                self.multiply_scalar(-1.0)
            }

            pub fn dot(&self, other: &Self) -> f64 {
                $crate::vector::algebra::dot(self.to_array(), other.to_array())
            }

            pub fn length_squared(&self) -> f64 {
                $crate::vector::algebra::length_squared(self.to_array())
            }

            pub fn length(&self) -> f64 {
                self.length_squared().sqrt()
            }

            pub fn distance_to_squared(&self, other: &Self) -> f64 {
                $crate::vector::algebra::distance_squared(self.to_array(), other.to_array())
            }

            pub fn distance_to(&self, other: &Self) -> f64 {
                self.distance_to_squared(other).sqrt()
            }

            /// Scale to unit length. A zero-length vector is left unchanged.
            pub fn normalize(&mut self) -> &mut Self {
                let len = self.length();
                if len == 0.0 {
                    return self;
                }
                self.multiply_scalar(1.0 / len)
            }

            /// Unit-length copy; zero stays zero.
            pub fn normalized(&self) -> Self {
                let mut v = *self;
                v.normalize();
                v
            }

            pub fn set_length(&mut self, length: f64) -> &mut Self {
                self.normalize().multiply_scalar(length)
            }

            pub fn lerp(&mut self, other: &Self, t: f64) -> &mut Self {
                let c = $crate::vector::algebra::lerp(self.to_array(), other.to_array(), t);
                self.set_components(c)
            }

            pub fn min(&mut self, other: &Self) -> &mut Self {
                let c = $crate::vector::algebra::zip(self.to_array(), other.to_array(), f64::min);
                self.set_components(c)
            }

            pub fn max(&mut self, other: &Self) -> &mut Self {
                let c = $crate::vector::algebra::zip(self.to_array(), other.to_array(), f64::max);
                self.set_components(c)
            }

            /// Clamp each component into `[min, max]`.
            pub fn clamp(&mut self, min: &Self, max: &Self) -> &mut Self {
                let c = $crate::vector::algebra::clamp(self.to_array(), min.to_array(), max.to_array());
                self.set_components(c)
            }

            pub fn clamp_scalar(&mut self, min: f64, max: f64) -> &mut Self {
                self.clamp(&Self::splat(min), &Self::splat(max))
            }

            pub fn equals(&self, other: &Self, eps: f64) -> bool {
                $crate::vector::algebra::all_close(self.to_array(), other.to_array(), eps)
            }

            pub fn is_finite(&self) -> bool {
                self.to_array().iter().all(|c| c.is_finite())
            }

            pub fn dump(&self) -> serde_json::Value {
                $crate::serial::dump(self)
            }

            pub fn load(value: &serde_json::Value) -> psurf_core::Result<Self> {
                $crate::serial::load(value)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ZERO
            }
        }

        /// Equality within [`psurf_core::EPSILON`].
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.equals(other, psurf_core::EPSILON)
            }
        }

        impl From<[f64; $dim]> for $name {
            fn from(components: [f64; $dim]) -> Self {
                Self::from_components(components)
            }
        }

        impl From<$name> for [f64; $dim] {
            fn from(v: $name) -> Self {
                v.to_array()
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;
            fn add(mut self, rhs: Self) -> Self {
                self.add_vector(&rhs);
                self
            }
        }

        impl std::ops::Sub for $name {
            type Output = Self;
            fn sub(mut self, rhs: Self) -> Self {
                self.sub_vector(&rhs);
                self
            }
        }

        impl std::ops::Mul<f64> for $name {
            type Output = Self;
            fn mul(mut self, rhs: f64) -> Self {
                self.multiply_scalar(rhs);
                self
            }
        }

        impl std::ops::Mul<$name> for f64 {
            type Output = $name;
            fn mul(self, mut rhs: $name) -> $name {
                rhs.multiply_scalar(self);
                rhs
            }
        }

        impl std::ops::Neg for $name {
            type Output = Self;
            fn neg(mut self) -> Self {
                self.negate();
                self
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.add_vector(&rhs);
            }
        }

        impl std::ops::SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                self.sub_vector(&rhs);
            }
        }

        impl std::ops::MulAssign<f64> for $name {
            fn mul_assign(&mut self, rhs: f64) {
                self.multiply_scalar(rhs);
            }
        }

        impl approx::AbsDiffEq for $name {
            type Epsilon = f64;

            fn default_epsilon() -> f64 {
                psurf_core::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                self.to_array()
                    .iter()
                    .zip(other.to_array().iter())
                    .all(|(a, b)| <f64 as approx::AbsDiffEq>::abs_diff_eq(a, b, epsilon))
            }
        }
    };
}

mod vector2;
mod vector3;
mod vector4;

pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
