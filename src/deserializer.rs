//! Serde deserializer implementation for INI documents
//!
//! A document deserializes as a map: root entries first, then one nested map
//! per named section. Scalar requests go through the conversion registry, so
//! `0x10` deserializes into a `u8` as 16 and `on` into a `bool` as true.
//! Strings are borrowed from the document.

use crate::convert::FromValue;
use crate::document::{Document, Section, Value};
use crate::error::IniError;
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeOwned, DeserializeSeed, IntoDeserializer, Visitor};
use std::path::Path;

/// Deserializer over a whole parsed document
pub struct DocumentDeserializer<'de> {
    document: &'de Document,
}

impl<'de> DocumentDeserializer<'de> {
    /// Creates a deserializer borrowing from `document`
    pub fn new(document: &'de Document) -> Self {
        Self { document }
    }
}

impl<'de> de::Deserializer<'de> for DocumentDeserializer<'de> {
    type Error = IniError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(DocumentMapAccess::new(self.document))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct enum
        identifier ignored_any
    }
}

/// Deserializer over one section
pub struct SectionDeserializer<'de> {
    section: &'de Section,
}

impl<'de> SectionDeserializer<'de> {
    /// Creates a deserializer borrowing from `section`
    pub fn new(section: &'de Section) -> Self {
        Self { section }
    }
}

impl<'de> de::Deserializer<'de> for SectionDeserializer<'de> {
    type Error = IniError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(SectionMapAccess::new(self.section))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct enum
        identifier ignored_any
    }
}

/// Deserializer over a single value
struct ValueDeserializer<'de> {
    value: &'de Value,
}

impl<'de> ValueDeserializer<'de> {
    fn new(value: &'de Value) -> Self {
        Self { value }
    }

    fn convert<T: FromValue>(&self) -> Result<T, IniError> {
        Ok(self.value.get::<T>()?)
    }
}

macro_rules! deserialize_scalar {
    ($($method:ident => $visit:ident: $ty:ty),+ $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value, Self::Error>
            where
                V: Visitor<'de>,
            {
                visitor.$visit(self.convert::<$ty>()?)
            }
        )+
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = IniError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value.as_str())
    }

    deserialize_scalar! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let mut chars = self.value.as_str().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(de::Error::invalid_value(
                de::Unexpected::Str(self.value.as_str()),
                &"a single character",
            )),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_enum(self.value.as_str().into_deserializer())
    }

    serde::forward_to_deserialize_any! {
        i128 u128 str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

/// Map access over a section's entries
struct SectionMapAccess<'de> {
    entries: indexmap::map::Iter<'de, String, Value>,
    current_value: Option<&'de Value>,
}

impl<'de> SectionMapAccess<'de> {
    fn new(section: &'de Section) -> Self {
        Self {
            entries: section.into_iter(),
            current_value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for SectionMapAccess<'de> {
    type Error = IniError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, value)) => {
                self.current_value = Some(value);
                seed.deserialize(BorrowedStrDeserializer::new(key.as_str()))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        match self.current_value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(IniError::Custom(
                "No value available for map entry".to_string(),
            )),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// The value half of a pending document map entry
enum Pending<'de> {
    Value(&'de Value),
    Section(&'de Section),
}

/// Map access over root entries followed by named sections
struct DocumentMapAccess<'de> {
    root: indexmap::map::Iter<'de, String, Value>,
    sections: indexmap::map::Iter<'de, String, Section>,
    pending: Option<Pending<'de>>,
}

impl<'de> DocumentMapAccess<'de> {
    fn new(document: &'de Document) -> Self {
        Self {
            root: document.root_section().into_iter(),
            sections: document.section_map().iter(),
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for DocumentMapAccess<'de> {
    type Error = IniError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        let key = if let Some((key, value)) = self.root.next() {
            self.pending = Some(Pending::Value(value));
            key
        } else if let Some((name, section)) = self.sections.next() {
            self.pending = Some(Pending::Section(section));
            name
        } else {
            return Ok(None);
        };

        seed.deserialize(BorrowedStrDeserializer::new(key.as_str()))
            .map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some(Pending::Value(value)) => seed.deserialize(ValueDeserializer::new(value)),
            Some(Pending::Section(section)) => seed.deserialize(SectionDeserializer::new(section)),
            None => Err(IniError::Custom(
                "No value available for map entry".to_string(),
            )),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.root.len() + self.sections.len())
    }
}

/// Deserializes a parsed document, borrowing strings from it
pub fn from_document<'de, T>(document: &'de Document) -> Result<T, IniError>
where
    T: de::Deserialize<'de>,
{
    T::deserialize(DocumentDeserializer::new(document))
}

/// Deserializes a single section, borrowing strings from it
pub fn from_section<'de, T>(section: &'de Section) -> Result<T, IniError>
where
    T: de::Deserialize<'de>,
{
    T::deserialize(SectionDeserializer::new(section))
}

/// Convenience function to parse INI text and deserialize it into a Rust type
pub fn from_str<T>(s: &str) -> Result<T, IniError>
where
    T: DeserializeOwned,
{
    let document: Document = s.parse()?;
    from_document(&document)
}

/// Convenience function to parse an INI file and deserialize it into a Rust type
pub fn from_file<T, P>(path: P) -> Result<T, IniError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let document = Document::from_file(path)?;
    from_document(&document)
}
