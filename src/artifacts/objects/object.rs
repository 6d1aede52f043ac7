use bytes::Bytes;
use std::io::BufRead;

pub trait Packable {
    fn serialize(&self) -> Bytes;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self>
    where
        Self: Sized;
}
