//! # zschema_lib
//!
//! `zschema_lib` generates OpenAPI schema documents for the built-in
//! Wikifunctions types, identified by their ZIDs.
//! A document can be generated in the normal or in the canonical form of the ZObjects.

mod catalog;
mod definition;
mod errors;
mod form;
mod schema;
mod sink;
pub use catalog::*;
pub use definition::*;
pub use errors::*;
pub use form::*;
pub use schema::*;
pub use sink::*;
use std::path::Path;

/// Generates the schema documents of the ZIDs known by a catalog.
pub struct SchemaGenerator<C: TypeCatalog = BuiltinCatalog> {
    form: Form,
    catalog: C,
}

impl SchemaGenerator<BuiltinCatalog> {
    /// A generator for the built-in types.
    pub fn new(form: Form) -> Self {
        Self::with_catalog(form, BuiltinCatalog::new())
    }
}

impl<C: TypeCatalog> SchemaGenerator<C> {
    pub fn with_catalog(form: Form, catalog: C) -> Self {
        Self { form, catalog }
    }

    /// The ZIDs a schema can be generated for.
    pub fn list(&self) -> Vec<String> {
        self.catalog.zids(self.form)
    }

    /// Builds the schema document of a ZID.
    ///
    /// # Examples
    ///
    /// ```
    /// use zschema_lib::{Form, SchemaGenerator};
    ///
    /// let document = SchemaGenerator::new(Form::Normal)
    ///     .schema("Z6", Some("mytag"))
    ///     .unwrap();
    /// assert_eq!(document.id, "mytag/Z6");
    /// assert!(document
    ///     .to_yaml()
    ///     .unwrap()
    ///     .starts_with("# Z6/String (Z4/Type)\n$id: mytag/Z6\n"));
    /// ```
    ///
    /// Unknown ZIDs are rejected
    ///
    /// ```
    /// use zschema_lib::{Error, Form, SchemaGenerator};
    ///
    /// let error = SchemaGenerator::new(Form::Normal)
    ///     .schema("Z9999", Some("mytag"))
    ///     .unwrap_err();
    /// assert!(matches!(error, Error::NotFound { .. }));
    /// ```
    pub fn schema(&self, zid: &str, tag: Option<&str>) -> Result<SchemaDocument> {
        let definition =
            self.catalog
                .definition(self.form, zid)
                .ok_or_else(|| Error::NotFound {
                    zid: zid.into(),
                    form: self.form,
                })?;
        SchemaBuilder::new(self.form, tag).build(zid, definition)
    }

    /// Builds the schema document of a ZID and hands it to the sink.
    pub fn generate<S: DocumentSink>(
        &self,
        zid: &str,
        tag: Option<&str>,
        sink: &mut S,
    ) -> Result<SchemaDocument> {
        let document = self.schema(zid, tag)?;
        sink.write_document(&document.zid, &document.to_yaml()?)?;
        Ok(document)
    }
}

/// Lists the built-in ZIDs a schema can be generated for in the given form.
///
/// # Examples
///
/// ```
/// use zschema_lib::{list, Form};
///
/// let zids = list(Form::Normal);
/// assert_eq!(zids.first().map(String::as_str), Some("Z1"));
/// assert!(zids.contains(&"Z40".to_string()));
/// ```
pub fn list(form: Form) -> Vec<String> {
    SchemaGenerator::new(form).list()
}

/// Generates the schema document of a built-in ZID, identified as `<tag>/<zid>`.
///
/// In dry run, the document is printed to the standard output and nothing is
/// written. Otherwise it is saved to `<root_directory>/<zid>.yaml`.
pub fn generate<P: AsRef<Path>>(
    root_directory: P,
    tag: &str,
    zid: &str,
    dry_run: bool,
    form: Form,
) -> Result<()> {
    let generator = SchemaGenerator::new(form);
    if dry_run {
        generator.generate(zid, Some(tag), &mut WriterSink::new(std::io::stdout().lock()))?;
    } else {
        generator.generate(
            zid,
            Some(tag),
            &mut DirectorySink::new(root_directory.as_ref()),
        )?;
    }
    Ok(())
}
