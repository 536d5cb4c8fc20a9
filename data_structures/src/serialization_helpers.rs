use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::address::{Address, ADDRESS_LENGTH};

#[derive(Deserialize, Serialize)]
struct AddressSerializationHelper {
    bytes: [u8; ADDRESS_LENGTH],
}

impl From<Address> for AddressSerializationHelper {
    fn from(x: Address) -> Self {
        Self { bytes: x.bytes }
    }
}

impl From<AddressSerializationHelper> for Address {
    fn from(x: AddressSerializationHelper) -> Self {
        Address { bytes: x.bytes }
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            AddressSerializationHelper::from(*self).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            String::deserialize(deserializer)?
                .parse::<Address>()
                .map_err(de::Error::custom)
        } else {
            AddressSerializationHelper::deserialize(deserializer).map(Into::into)
        }
    }
}
