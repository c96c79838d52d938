use nodelens_core::{ContextEntry, NodeGroupSummary, NodeSummary, PodSummary, Served};

/// Clamped list selection. Movement never wraps; an empty list carries no
/// selection at all and renders its explicit empty state instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    pub selected: Option<usize>,
}

impl ListCursor {
    /// Move toward the top. Returns whether the selection moved.
    pub fn up(&mut self) -> bool {
        match self.selected {
            Some(i) if i > 0 => {
                self.selected = Some(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Move toward the bottom of a `len`-item list. Returns whether the
    /// selection moved.
    pub fn down(&mut self, len: usize) -> bool {
        if len == 0 {
            let had = self.selected.is_some();
            self.selected = None;
            return had;
        }
        let next = match self.selected {
            None => 0,
            Some(i) => (i + 1).min(len - 1),
        };
        let moved = self.selected != Some(next);
        self.selected = Some(next);
        moved
    }

    /// Re-fit the selection after the item list changed size.
    pub fn clamp(&mut self, len: usize) {
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Typing,
    Results,
}

#[derive(Debug)]
pub struct MainView {
    pub groups: Vec<NodeGroupSummary>,
    pub cursor: ListCursor,
    pub loading: bool,
    pub error: Option<String>,
    pub served: Option<Served>,
}

impl MainView {
    pub fn loading() -> Self {
        Self { groups: Vec::new(), cursor: ListCursor::default(), loading: true, error: None, served: None }
    }

    pub fn empty() -> Self {
        Self { loading: false, ..Self::loading() }
    }
}

#[derive(Debug)]
pub struct PodSearchView {
    pub pattern: String,
    pub phase: SearchPhase,
    pub results: Vec<PodSummary>,
    pub cursor: ListCursor,
    pub loading: bool,
    pub error: Option<String>,
    pub served: Option<Served>,
    pub back: Box<View>,
}

impl PodSearchView {
    pub fn open(back: View) -> Self {
        Self {
            pattern: String::new(),
            phase: SearchPhase::Typing,
            results: Vec::new(),
            cursor: ListCursor::default(),
            loading: false,
            error: None,
            served: None,
            back: Box::new(back),
        }
    }
}

#[derive(Debug)]
pub struct ContextSelectView {
    pub contexts: Vec<ContextEntry>,
    pub cursor: ListCursor,
    pub loading: bool,
    pub error: Option<String>,
    pub back: Box<View>,
}

impl ContextSelectView {
    pub fn open(back: View) -> Self {
        Self {
            contexts: Vec::new(),
            cursor: ListCursor::default(),
            loading: true,
            error: None,
            back: Box::new(back),
        }
    }
}

/// What a node-shaped detail view is waiting for: either the members of a
/// selected group, or the single node hosting a pod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailRequest {
    GroupNodes { group: String },
    HostNode { node: String },
}

#[derive(Debug)]
pub enum DetailContent {
    Nodes(Vec<NodeSummary>),
    PodFields(Vec<(String, String)>),
}

impl DetailContent {
    pub fn len(&self) -> usize {
        match self {
            Self::Nodes(nodes) => nodes.len(),
            Self::PodFields(fields) => fields.len(),
        }
    }
}

#[derive(Debug)]
pub struct DetailView {
    pub title: String,
    pub request: Option<DetailRequest>,
    pub content: DetailContent,
    pub cursor: ListCursor,
    pub loading: bool,
    pub error: Option<String>,
    pub served: Option<Served>,
    pub back: Box<View>,
}

impl DetailView {
    /// A node listing that still has to be fetched.
    pub fn nodes(title: String, request: DetailRequest, back: View) -> Self {
        Self {
            title,
            request: Some(request),
            content: DetailContent::Nodes(Vec::new()),
            cursor: ListCursor::default(),
            loading: true,
            error: None,
            served: None,
            back: Box::new(back),
        }
    }

    /// A pod rendered from the snapshot the search view already holds.
    pub fn pod(pod: &PodSummary, back: View) -> Self {
        let fields = pod.detail_fields();
        let mut cursor = ListCursor::default();
        cursor.clamp(fields.len());
        Self {
            title: format!("Pod: {}/{}", pod.namespace, pod.name),
            request: None,
            content: DetailContent::PodFields(fields),
            cursor,
            loading: false,
            error: None,
            served: None,
            back: Box::new(back),
        }
    }
}

#[derive(Debug)]
pub enum View {
    Main(MainView),
    PodSearch(PodSearchView),
    ContextSelect(ContextSelectView),
    Detail(DetailView),
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Main(_) => "main",
            Self::PodSearch(_) => "search",
            Self::ContextSelect(_) => "contexts",
            Self::Detail(_) => "detail",
        }
    }
}

#[cfg(test)]
mod tests;
