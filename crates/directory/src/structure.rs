use httpsh_types::RequestInfo;
use indexmap::IndexMap;

/// Index of a node inside one [`DirectoryStructure`].
///
/// Ids are only meaningful for the structure that issued them; a rebuilt
/// tree starts over from [`DirectoryStructure::ROOT`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    /// Lower-cased name to child id, in declaration order.
    children: IndexMap<String, NodeId>,
    request_info: Option<RequestInfo>,
}

impl Node {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: IndexMap::new(),
            request_info: None,
        }
    }
}

/// Arena-backed tree of virtual directories.
///
/// Children are matched case-insensitively and keep the spelling of their
/// first declaration. Nodes are never removed; replacing the API description
/// replaces the whole structure.
#[derive(Debug, Clone)]
pub struct DirectoryStructure {
    nodes: Vec<Node>,
}

impl Default for DirectoryStructure {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryStructure {
    pub const ROOT: NodeId = NodeId(0);

    /// A structure holding only the unnamed root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("", None)],
        }
    }

    pub fn root(&self) -> Directory<'_> {
        Directory {
            structure: self,
            id: Self::ROOT,
        }
    }

    /// Read handle for `id`, or `None` when the id was not issued by this
    /// structure.
    pub fn directory(&self, id: NodeId) -> Option<Directory<'_>> {
        (id.0 < self.nodes.len()).then_some(Directory { structure: self, id })
    }

    /// `true` when nothing but the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Total node count, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the child of `parent` named `name`, creating it when absent.
    pub fn declare_directory(&mut self, parent: NodeId, name: &str) -> NodeId {
        let key = name.to_lowercase();
        if let Some(existing) = self.nodes[parent.0].children.get(&key) {
            return *existing;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name, Some(parent)));
        self.nodes[parent.0].children.insert(key, id);
        id
    }

    /// Finds the child of `parent` named `name`, ignoring case.
    pub fn child_directory(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[parent.0].children.get(&name.to_lowercase()).copied()
    }

    /// Child names of `id` in declaration order.
    pub fn directory_names(&self, id: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.nodes[id.0]
            .children
            .values()
            .map(|child| self.nodes[child.0].name.as_str())
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn request_info(&self, id: NodeId) -> Option<&RequestInfo> {
        self.nodes[id.0].request_info.as_ref()
    }

    /// The request info of `id`, created empty on first access.
    pub fn request_info_mut(&mut self, id: NodeId) -> &mut RequestInfo {
        self.nodes[id.0].request_info.get_or_insert_with(RequestInfo::new)
    }

    /// Walks `segments` from `start`.
    ///
    /// `.` stays put, `..` moves to the parent (and stays at the root), empty
    /// segments are skipped, anything else must name an existing child.
    pub fn traverse<'s, I>(&self, start: NodeId, segments: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let mut current = start;
        for segment in segments {
            match segment {
                "" | "." => {}
                ".." => current = self.parent(current).unwrap_or(current),
                name => current = self.child_directory(current, name)?,
            }
        }
        Some(current)
    }

    /// Names from the root down to `id`, root excluded.
    pub fn path_segments(&self, id: NodeId) -> Vec<&str> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            if node != Self::ROOT {
                segments.push(self.name(node));
            }
            current = self.parent(node);
        }
        segments.reverse();
        segments
    }
}

/// Borrowed view of one node.
#[derive(Clone, Copy)]
pub struct Directory<'a> {
    structure: &'a DirectoryStructure,
    id: NodeId,
}

impl<'a> Directory<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        self.structure.name(self.id)
    }

    pub fn is_root(&self) -> bool {
        self.id == DirectoryStructure::ROOT
    }

    pub fn parent(&self) -> Option<Directory<'a>> {
        self.structure.parent(self.id).map(|id| Directory {
            structure: self.structure,
            id,
        })
    }

    pub fn child(&self, name: &str) -> Option<Directory<'a>> {
        self.structure.child_directory(self.id, name).map(|id| Directory {
            structure: self.structure,
            id,
        })
    }

    pub fn children(&self) -> impl Iterator<Item = Directory<'a>> + 'a {
        let structure = self.structure;
        structure.nodes[self.id.0]
            .children
            .values()
            .map(move |&id| Directory { structure, id })
    }

    pub fn directory_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.structure.directory_names(self.id)
    }

    pub fn request_info(&self) -> Option<&'a RequestInfo> {
        self.structure.request_info(self.id)
    }

    /// Upper-cased methods this directory supports, in declaration order.
    pub fn methods(&self) -> Vec<&'a str> {
        self.request_info()
            .map(|info| info.methods().collect())
            .unwrap_or_default()
    }

    pub fn traverse<'s, I>(&self, segments: I) -> Option<Directory<'a>>
    where
        I: IntoIterator<Item = &'s str>,
    {
        self.structure.traverse(self.id, segments).map(|id| Directory {
            structure: self.structure,
            id,
        })
    }

    /// Absolute path of this directory, `/` for the root.
    pub fn path(&self) -> String {
        format!("/{}", self.structure.path_segments(self.id).join("/"))
    }
}

impl std::fmt::Debug for Directory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("id", &self.id)
            .field("path", &self.path())
            .finish()
    }
}
