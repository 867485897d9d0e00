/// Binary-tree links (`p`, `l`, `r`).
///
/// Every link is an arena index. `p` is a back-link and owns nothing; the
/// arena owns all nodes.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

#[derive(Clone, Debug)]
pub struct TreeNode<T> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub value: T,
}

impl<T> TreeNode<T> {
    pub fn new(value: T, p: Option<u32>) -> Self {
        Self {
            p,
            l: None,
            r: None,
            value,
        }
    }
}

impl<T> Node for TreeNode<T> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}
