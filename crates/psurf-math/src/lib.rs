mod serial;

pub mod vector;
pub mod aabb;
pub mod coordinate;
pub mod euler;
pub mod interval;
pub mod matrix3;
pub mod matrix4;
pub mod period_interval;
pub mod quaternion;

pub use aabb::Aabb3;
pub use coordinate::Coordinate3;
pub use euler::{Euler, EulerOrder};
pub use interval::Interval;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use period_interval::PeriodInterval;
pub use quaternion::Quaternion;
pub use vector::{Vector2, Vector3, Vector4};
