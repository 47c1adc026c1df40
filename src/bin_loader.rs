use bincode::{deserialize, serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;

pub fn save_to_file<T: serde::Serialize>(value: &T, filename: impl AsRef<Path>) -> Result<()> {
    let encoded: Vec<u8> = serialize(value)?;
    let mut file = File::create(filename)?;
    file.write_all(&encoded)?;
    Ok(())
}

pub fn load_from_file<T: serde::de::DeserializeOwned>(filename: impl AsRef<Path>) -> Result<T> {
    let mut buffer = Vec::new();
    File::open(filename)?.read_to_end(&mut buffer)?;
    Ok(deserialize(&buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{circuit::VariableLayout, error::Error, node::NodeId};

    #[test]
    fn test_round_trip_layout() {
        let layout = VariableLayout {
            num_public: 1,
            num_slots: 2,
            slots: vec![NodeId(1), NodeId(0)],
        };
        let path = std::env::temp_dir().join(format!("layout-{}.bin", std::process::id()));
        save_to_file(&layout, &path).unwrap();
        let loaded: VariableLayout = load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, layout);
    }

    #[test]
    fn test_missing_file() {
        let result: Result<VariableLayout> = load_from_file("does/not/exist.bin");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
