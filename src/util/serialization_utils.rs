use serde::{Serialize, Serializer, Deserialize, Deserializer};
use glam::f64::{DVec3, DQuat};

/// Module to handle serialization of DVec3 type
pub mod dvec3_serializer {
    use super::*;

    pub fn serialize<S>(vec: &DVec3, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize DVec3 as an array of 3 f64 values
        (vec.x, vec.y, vec.z).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DVec3, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Deserialize from an array of 3 f64 values
        let (x, y, z) = <(f64, f64, f64)>::deserialize(deserializer)?;
        Ok(DVec3::new(x, y, z))
    }
}

/// Module to handle serialization of DQuat type
pub mod dquat_serializer {
    use super::*;

    pub fn serialize<S>(quat: &DQuat, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize DQuat as an array of 4 f64 values
        (quat.x, quat.y, quat.z, quat.w).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DQuat, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Deserialize from an array of 4 f64 values
        let (x, y, z, w) = <(f64, f64, f64, f64)>::deserialize(deserializer)?;
        Ok(DQuat::from_xyzw(x, y, z, w))
    }
}
