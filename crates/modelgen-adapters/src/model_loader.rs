//! Model document parsing.
//!
//! A model document describes modules, entities and imports by name. It is
//! read from TOML or JSON and converted into a [`ModelBuilder`]; all
//! cross-reference resolution happens in the builder.
//!
//! # TOML format
//!
//! ```toml
//! [[modules]]
//! name    = "Shop"
//! comment = "Storefront"            # optional
//!
//! [[modules.enums]]
//! name     = "Status"
//! literals = ["Open", "Paid"]
//!
//! [[modules.entities]]
//! name     = "Order"
//! abstract = false                  # optional
//! extends  = "Document"             # optional; bare, dotted or import.Entity
//!
//! [[modules.entities.attributes]]
//! name   = "total"
//! type   = "decimal"                # see DataType
//! unique = false                    # optional
//! blank  = false                    # optional
//! min    = 0                        # optional
//! max    = 10000                    # optional
//!
//! [[modules.entities.enum_attributes]]
//! name = "status"
//! enum = "Status"
//!
//! [[modules.entities.relations]]
//! name   = "items"
//! kind   = "one-to-many"            # one-to-one | one-to-many | many-to-one | many-to-many
//! target = "LineItem"
//!
//! [[modules.modules]]               # nested modules, same shape
//! name = "Billing"
//!
//! [[imports]]
//! name         = "crm"
//! library      = "crm-lib"
//! package_path = "crm/models"       # optional
//! entities     = ["Customer"]
//! ```
//!
//! JSON documents use the same field names.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::{debug, instrument};

use modelgen_core::{
    application::ApplicationError,
    domain::{
        Attribute, Cardinality, DataType, DomainError, EntityDecl, ImportDecl, ModelBuilder,
        ModuleDecl,
    },
    error::ModelgenResult,
};

// ── Document types ────────────────────────────────────────────────────────────

/// Deserialised representation of a model document.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
    #[serde(default)]
    pub imports: Vec<ImportEntry>,
}

/// One `[[modules]]` table, possibly nested.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ModuleEntry {
    pub name: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub enums: Vec<EnumEntry>,
    #[serde(default)]
    pub entities: Vec<EntityEntry>,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct EnumEntry {
    pub name: String,
    pub literals: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct EntityEntry {
    pub name: String,
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
    pub extends: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
    #[serde(default)]
    pub enum_attributes: Vec<EnumAttributeEntry>,
    #[serde(default)]
    pub relations: Vec<RelationEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct AttributeEntry {
    pub name: String,
    /// Parsed with [`DataType::from_str`](std::str::FromStr), case-insensitive.
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub blank: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct EnumAttributeEntry {
    pub name: String,
    #[serde(rename = "enum")]
    pub enum_name: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RelationEntry {
    pub name: String,
    pub kind: String,
    pub target: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ImportEntry {
    pub name: String,
    pub library: String,
    pub package_path: Option<String>,
    #[serde(default)]
    pub entities: Vec<String>,
}

// ── Formats ───────────────────────────────────────────────────────────────────

/// Serialization format of a model document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    /// Format implied by the file extension (`.toml`, `.json`).
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Format of a model document discovered in a directory tree.
    ///
    /// Only `*.model.toml` and `*.model.json` qualify, so other TOML or JSON
    /// files living next to the models are left alone.
    pub fn from_model_file_name(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".model.toml") {
            Some(Self::Toml)
        } else if name.ends_with(".model.json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

impl ModelDocument {
    /// Parse document text. `origin` is only used in error messages.
    pub fn parse(raw: &str, format: DocumentFormat, origin: &Path) -> ModelgenResult<Self> {
        let parsed = match format {
            DocumentFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        };

        parsed.map_err(|reason| {
            ApplicationError::ParseFailed {
                path: origin.to_path_buf(),
                reason,
            }
            .into()
        })
    }

    /// Read and parse the document at `path`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path, format: DocumentFormat) -> ModelgenResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let document = Self::parse(&raw, format, path)?;
        debug!(
            modules = document.modules.len(),
            imports = document.imports.len(),
            "Parsed model document"
        );
        Ok(document)
    }

    /// Convert into builder declarations, parsing data types and cardinalities.
    pub fn into_builder(self) -> Result<ModelBuilder, DomainError> {
        let mut builder = ModelBuilder::new();
        for module in self.modules {
            builder = builder.module(module_decl(module)?);
        }
        for import in self.imports {
            builder = builder.import(import_decl(import));
        }
        Ok(builder)
    }
}

fn module_decl(entry: ModuleEntry) -> Result<ModuleDecl, DomainError> {
    let mut decl = ModuleDecl::new(entry.name);
    if let Some(comment) = entry.comment {
        decl = decl.with_comment(comment);
    }
    for def in entry.enums {
        decl = decl.enumeration(def.name, def.literals);
    }
    for entity in entry.entities {
        decl = decl.entity(entity_decl(entity)?);
    }
    for child in entry.modules {
        decl = decl.submodule(module_decl(child)?);
    }
    Ok(decl)
}

fn entity_decl(entry: EntityEntry) -> Result<EntityDecl, DomainError> {
    let mut decl = EntityDecl::new(entry.name);
    if entry.is_abstract {
        decl = decl.abstract_entity();
    }
    if let Some(parent) = entry.extends {
        decl = decl.extends(parent);
    }
    if let Some(comment) = entry.comment {
        decl = decl.with_comment(comment);
    }

    for attr in entry.attributes {
        let data_type: DataType = attr.data_type.parse()?;
        let mut attribute = Attribute::new(attr.name, data_type).bounds(attr.min, attr.max);
        if attr.unique {
            attribute = attribute.unique();
        }
        if attr.blank {
            attribute = attribute.blank();
        }
        if let Some(comment) = attr.comment {
            attribute = attribute.with_comment(comment);
        }
        decl = decl.attribute(attribute);
    }

    for attr in entry.enum_attributes {
        decl = decl.enum_attribute(attr.name, attr.enum_name);
    }

    for relation in entry.relations {
        let kind: Cardinality = relation.kind.parse()?;
        decl = decl.relation(relation.name, kind, relation.target);
    }

    Ok(decl)
}

fn import_decl(entry: ImportEntry) -> ImportDecl {
    let mut decl = ImportDecl::new(entry.name, entry.library);
    if let Some(path) = entry.package_path {
        decl = decl.package_path(path);
    }
    for entity in entry.entities {
        decl = decl.entity(entity);
    }
    decl
}

// ── Tests ─────────────────────────────────────────────────────────────────────
