use serde::{Deserialize, Serialize};

/// Catalog record submitted to the book registry.
///
/// `id` is derived from the content by the registry; any value the client
/// sends is overwritten.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub author: String,
    pub publish_date: String,
    pub isbn: String,
}

impl Book {
    /// Bytes the content identifier is derived from.
    pub fn identity_material(&self) -> Vec<u8> {
        let mut material = Vec::with_capacity(self.isbn.len() + self.publish_date.len());
        material.extend_from_slice(self.isbn.as_bytes());
        material.extend_from_slice(self.publish_date.as_bytes());
        material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_material_is_isbn_then_date() {
        let book = Book {
            id: String::new(),
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            publish_date: "1965-08-01".into(),
            isbn: "9780441013593".into(),
        };
        assert_eq!(book.identity_material(), b"97804410135931965-08-01".to_vec());
    }

    #[test]
    fn id_is_optional_on_input() {
        let book: Book = serde_json::from_str(
            r#"{"title":"t","author":"a","publish_date":"d","isbn":"i"}"#,
        )
        .unwrap();
        assert!(book.id.is_empty());
    }
}
