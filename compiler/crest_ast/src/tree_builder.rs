/// Builds the intermediate tree the AST dumper prints. `open` starts a
/// node, `close` finishes it and attaches it to its parent; the builder
/// holds at most one finished root.
#[derive(Default)]
pub struct TreeBuilder {
    root: Option<TreeItem>,
    stack: Vec<TreeItem>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&self) -> Option<TreeItem> {
        self.root.clone()
    }

    pub fn append_leaf(&mut self, header: String) -> &mut Self {
        self.open(header).close()
    }

    pub fn open(&mut self, header: String) -> &mut Self {
        self.stack.push(TreeItem::new(header));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        let item = self.stack.pop().expect("close without a matching open");

        match self.stack.last_mut() {
            Some(parent) => parent.children.push(item),
            None => self.root = Some(item),
        }

        self
    }
}

#[derive(Clone, Debug)]
pub struct TreeItem {
    pub header: String,
    pub children: Vec<TreeItem>,
}

impl TreeItem {
    pub fn new(header: String) -> Self {
        Self {
            header,
            children: Vec::new(),
        }
    }
}

impl std::fmt::Display for TreeItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.header)?;
        print_children(f, self, "")
    }
}

fn print_children(
    f: &mut std::fmt::Formatter<'_>,
    entry: &TreeItem,
    indent: &str,
) -> std::fmt::Result {
    let count = entry.children.len();

    for (n, child) in entry.children.iter().enumerate() {
        let last = n + 1 == count;
        let branch = if last { "`-" } else { "|-" };
        writeln!(f, "{indent}{branch}{}", child.header)?;

        let next = if last {
            format!("{indent}  ")
        } else {
            format!("{indent}| ")
        };
        print_children(f, child, &next)?;
    }

    Ok(())
}
