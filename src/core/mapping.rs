use std::{
    any::{Any, TypeId},
    collections::{HashMap, HashSet},
    fmt,
    marker::PhantomData,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

use log::debug;

use crate::{
    core::record::{FieldDescriptor, Record},
    error::CodecError,
};

/// One `field -> column` entry of a [`FieldMap`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldMapping {
    pub field: String,
    pub column: String,
}

/// Projects and renames the fields of `R` onto CSV columns.
///
/// Columns appear in the order entries were added. Fields that are not mapped
/// are left out of the output entirely.
///
/// # Examples
///
/// ```
/// use csv_record_codec::{csv_record, FieldMap};
///
/// #[derive(Debug, Default)]
/// struct Person {
///     first_name: String,
///     last_name: String,
/// }
///
/// csv_record! {
///     Person {
///         first_name: String => "FirstName",
///         last_name: String => "LastName",
///     }
/// }
///
/// let map = FieldMap::<Person>::new()
///     .map("LastName", "surname")
///     .map("FirstName", "forename");
/// assert_eq!(map.entries().len(), 2);
/// ```
pub struct FieldMap<R> {
    entries: Vec<FieldMapping>,
    record: PhantomData<fn() -> R>,
}

impl<R> FieldMap<R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            record: PhantomData,
        }
    }

    /// Maps the field whose default name is `field` to the column `column`.
    pub fn map(mut self, field: &str, column: &str) -> Self {
        self.entries.push(FieldMapping {
            field: field.to_string(),
            column: column.to_string(),
        });
        self
    }

    pub fn entries(&self) -> &[FieldMapping] {
        &self.entries
    }
}

impl<R> Default for FieldMap<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for FieldMap<R> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            record: PhantomData,
        }
    }
}

impl<R> fmt::Debug for FieldMap<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMap")
            .field("entries", &self.entries)
            .finish()
    }
}

/// A field descriptor bound to the column it occupies.
pub struct ResolvedColumn<R: 'static> {
    pub order: usize,
    pub header: String,
    pub descriptor: &'static FieldDescriptor<R>,
}

impl<R: 'static> fmt::Debug for ResolvedColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedColumn")
            .field("order", &self.order)
            .field("header", &self.header)
            .field("descriptor", self.descriptor)
            .finish()
    }
}

/// Ordered columns of a record type, shared through the resolver cache.
pub type Columns<R> = Arc<Vec<ResolvedColumn<R>>>;

type CacheKey = (TypeId, Option<Vec<FieldMapping>>);
type Cache = RwLock<HashMap<CacheKey, Arc<dyn Any + Send + Sync>>>;

fn cache() -> &'static Cache {
    static CACHE: OnceLock<Cache> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Resolves the columns of `R`, applying `field_map` when given.
///
/// Results are cached per record type and map contents for the life of the
/// process. Two threads racing on the same key both compute the same columns
/// and the first insert wins.
pub fn resolve<R: Record>(field_map: Option<&FieldMap<R>>) -> Result<Columns<R>, CodecError> {
    let key: CacheKey = (TypeId::of::<R>(), field_map.map(|m| m.entries.clone()));

    let cached = cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .cloned();
    if let Some(entry) = cached.and_then(|entry| entry.downcast::<Vec<ResolvedColumn<R>>>().ok()) {
        return Ok(entry);
    }

    let columns: Columns<R> = Arc::new(match field_map {
        Some(map) => resolve_mapped(map)?,
        None => resolve_default::<R>(),
    });
    debug!(
        "Resolved {} column(s) for {}",
        columns.len(),
        std::any::type_name::<R>()
    );

    let mut guard = cache().write().unwrap_or_else(PoisonError::into_inner);
    let entry = guard
        .entry(key)
        .or_insert_with(|| columns.clone() as Arc<dyn Any + Send + Sync>)
        .clone();

    Ok(entry
        .downcast::<Vec<ResolvedColumn<R>>>()
        .unwrap_or(columns))
}

fn resolve_default<R: Record>() -> Vec<ResolvedColumn<R>> {
    R::descriptors()
        .iter()
        .enumerate()
        .map(|(order, descriptor)| ResolvedColumn {
            order,
            header: descriptor.name.to_string(),
            descriptor,
        })
        .collect()
}

fn resolve_mapped<R: Record>(map: &FieldMap<R>) -> Result<Vec<ResolvedColumn<R>>, CodecError> {
    if map.entries.is_empty() {
        return Err(CodecError::InvalidArgument(
            "field map has no entries".to_string(),
        ));
    }

    let descriptors = R::descriptors();
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(map.entries.len());

    for (order, entry) in map.entries.iter().enumerate() {
        let descriptor = descriptors
            .iter()
            .find(|d| d.name == entry.field)
            .ok_or_else(|| CodecError::UnknownField {
                field: entry.field.clone(),
            })?;

        if !seen.insert(entry.column.as_str()) {
            return Err(CodecError::DuplicateColumn {
                column: entry.column.clone(),
            });
        }

        columns.push(ResolvedColumn {
            order,
            header: entry.column.clone(),
            descriptor,
        });
    }

    Ok(columns)
}
