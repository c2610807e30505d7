use httpsh_types::EndpointMetadata;
use tracing::debug;

use crate::DirectoryStructure;

/// Builds a fresh endpoint tree from reader output.
///
/// Each path is split on `/` with empty segments dropped, so `/api/Employees`
/// and `api/Employees/` land on the same node. The terminal node records the
/// path's methods; when two paths normalise to the same node, their methods
/// are merged and a method present in both keeps the later content types.
pub fn build_directory_structure(metadata: &[EndpointMetadata]) -> DirectoryStructure {
    let mut structure = DirectoryStructure::new();

    for endpoint in metadata {
        let mut node = DirectoryStructure::ROOT;
        for segment in endpoint.segments() {
            node = structure.declare_directory(node, segment);
        }

        let request_info = structure.request_info_mut(node);
        for (method, content_types) in &endpoint.available_requests {
            request_info.set_content_types(method, content_types.clone());
        }
    }

    debug!(
        endpoints = metadata.len(),
        nodes = structure.node_count(),
        "built endpoint tree"
    );
    structure
}
