//! Storage key derivation for files attached to a process instance.
//!
//! Keys have the shape `<namespace>/<process_instance_id>/<file_id>`. The
//! prefix for a process instance keeps the trailing delimiter, so it is a
//! prefix of every key derived for that instance and of no key derived for any
//! other instance. Prefix listing and bulk deletion rely on this.

/// Namespace segment used when none is configured.
pub const DEFAULT_KEY_NAMESPACE: &str = "process";

const DELIMITER: char = '/';

/// Maps logical file identity to a physical storage key.
pub trait FormDataFileKeyProvider: Clone + Send + Sync + 'static {
    fn generate_key(&self, process_instance_id: &str, file_id: &str) -> String;

    fn key_prefix_by_process_instance_id(&self, process_instance_id: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultFormDataFileKeyProvider {
    namespace: String,
}

impl DefaultFormDataFileKeyProvider {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl Default for DefaultFormDataFileKeyProvider {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_NAMESPACE)
    }
}

impl FormDataFileKeyProvider for DefaultFormDataFileKeyProvider {
    fn generate_key(&self, process_instance_id: &str, file_id: &str) -> String {
        let mut key = self.key_prefix_by_process_instance_id(process_instance_id);
        key.push_str(&escape_segment(file_id));
        key
    }

    fn key_prefix_by_process_instance_id(&self, process_instance_id: &str) -> String {
        format!(
            "{}{DELIMITER}{}{DELIMITER}",
            self.namespace,
            escape_segment(process_instance_id)
        )
    }
}

/// Percent-escapes `%` and the delimiter so an identifier always stays inside
/// its own key segment.
fn escape_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            DELIMITER => escaped.push_str("%2F"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_namespaced_key() {
        let provider = DefaultFormDataFileKeyProvider::default();
        assert_eq!(
            provider.generate_key("proc-1", "file-9"),
            "process/proc-1/file-9"
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let provider = DefaultFormDataFileKeyProvider::default();
        assert_eq!(
            provider.generate_key("proc-1", "file-9"),
            provider.generate_key("proc-1", "file-9")
        );
    }

    #[test]
    fn prefix_covers_keys_of_same_instance_only() {
        let provider = DefaultFormDataFileKeyProvider::default();
        let prefix = provider.key_prefix_by_process_instance_id("proc-1");

        for file_id in ["a", "b", "", "file.pdf"] {
            assert!(provider.generate_key("proc-1", file_id).starts_with(&prefix));
        }
        for other in ["proc-10", "proc-", "proc", "proc-2"] {
            assert!(!provider.generate_key(other, "a").starts_with(&prefix));
        }
    }

    #[test]
    fn delimiter_in_identifiers_cannot_cross_instances() {
        let provider = DefaultFormDataFileKeyProvider::default();
        let prefix = provider.key_prefix_by_process_instance_id("tenant");

        let injected = provider.generate_key("tenant/other", "file");
        assert!(!injected.starts_with(&prefix));
        assert_eq!(injected, "process/tenant%2Fother/file");

        let nested = provider.generate_key("tenant", "../x/y");
        assert_eq!(nested, "process/tenant/..%2Fx%2Fy");
    }

    #[test]
    fn escaping_is_injective_for_percent() {
        let provider = DefaultFormDataFileKeyProvider::default();
        assert_ne!(
            provider.generate_key("a%2Fb", "f"),
            provider.generate_key("a/b", "f")
        );
    }

    #[test]
    fn custom_namespace() {
        let provider = DefaultFormDataFileKeyProvider::new("form-data");
        assert_eq!(provider.namespace(), "form-data");
        assert_eq!(provider.generate_key("p", "f"), "form-data/p/f");
        assert_eq!(provider.key_prefix_by_process_instance_id("p"), "form-data/p/");
    }
}
