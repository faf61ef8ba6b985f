//! Contains custom serialization and deserialization functions.

/// Serializes and deserializes values that Steam sends as strings, e.g. `"13799599785"`.
pub mod string {
    use std::fmt::Display;
    use std::str::FromStr;
    use serde::{de, Serializer, Deserialize, Deserializer};
    
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }
    
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?.parse().map_err(de::Error::custom)
    }
}

/// Deserializes a string into a number, treating a missing or empty value as `0`.
pub mod string_or_zero {
    use std::fmt::Display;
    use std::str::FromStr;
    use serde::{de, Serializer, Deserialize, Deserializer};
    
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }
    
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + Default,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.is_empty() => s.parse().map_err(de::Error::custom),
            _ => Ok(T::default()),
        }
    }
}

/// Deserializes a number sent either as a string or as a JSON number. Serializes as a string.
pub mod string_or_number {
    use std::fmt::Display;
    use std::marker::PhantomData;
    use std::str::FromStr;
    use serde::{Serializer, Deserializer};
    use serde::de::{self, Visitor};
    
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }
    
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + TryFrom<u64>,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        struct StringOrNumberVisitor<T> {
            marker: PhantomData<fn() -> T>,
        }
        
        impl<'de, T> Visitor<'de> for StringOrNumberVisitor<T>
        where
            T: FromStr + TryFrom<u64>,
            T::Err: Display,
        {
            type Value = T;
            
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number or a number string")
            }
            
            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                T::try_from(v)
                    .map_err(|_e| de::Error::custom("Number too large to fit in target type"))
            }
            
            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let v = u64::try_from(v)
                    .map_err(|_e| de::Error::invalid_value(de::Unexpected::Signed(v), &self))?;
                
                self.visit_u64(v)
            }
            
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse::<T>().map_err(de::Error::custom)
            }
        }
        
        deserializer.deserialize_any(StringOrNumberVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::{Serialize, Deserialize};
    
    #[derive(Debug, Serialize, Deserialize)]
    struct Ids {
        #[serde(with = "super::string")]
        id: u64,
        #[serde(default, with = "super::string_or_zero")]
        creator_id: u64,
    }
    
    #[test]
    fn deserializes_number_strings() {
        let ids: Ids = serde_json::from_str(r#"{"id":"13799599785","creator_id":"5723402945"}"#).unwrap();
        
        assert_eq!(ids.id, 13799599785);
        assert_eq!(ids.creator_id, 5723402945);
    }
    
    #[test]
    fn missing_or_empty_is_zero() {
        let ids: Ids = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        
        assert_eq!(ids.creator_id, 0);
        
        let ids: Ids = serde_json::from_str(r#"{"id":"1","creator_id":""}"#).unwrap();
        
        assert_eq!(ids.creator_id, 0);
    }
    
    #[test]
    fn rejects_non_numeric_id() {
        assert!(serde_json::from_str::<Ids>(r#"{"id":"abc"}"#).is_err());
    }
    
    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Ids { id: 1, creator_id: 2 }).unwrap();
        
        assert_eq!(json, r#"{"id":"1","creator_id":"2"}"#);
    }
    
    #[derive(Debug, Deserialize)]
    struct Pair {
        #[serde(with = "super::string_or_number")]
        id: u64,
        #[serde(with = "super::string_or_number")]
        nonce: u64,
    }
    
    #[test]
    fn accepts_string_or_number() {
        let pair: Pair = serde_json::from_str(r#"{"id":13799599785,"nonce":"3630989396"}"#).unwrap();
        
        assert_eq!(pair.id, 13799599785);
        assert_eq!(pair.nonce, 3630989396);
    }
    
    #[test]
    fn rejects_negative_or_fractional_number() {
        assert!(serde_json::from_str::<Pair>(r#"{"id":-1,"nonce":"1"}"#).is_err());
        assert!(serde_json::from_str::<Pair>(r#"{"id":1.5,"nonce":"1"}"#).is_err());
        assert!(serde_json::from_str::<Pair>(r#"{"id":"12a","nonce":"1"}"#).is_err());
    }
}
