use core::fmt;

use generational_arena::Index;

use crate::AvlTree;
use crate::utils::Side;

/// Renders an [`AvlTree`] in graphviz `dot` format.
pub struct Dot<'a, T, C> {
    pub(crate) tree: &'a AvlTree<T, C>,
}

impl<T, C> Dot<'_, T, C>
where
    T: fmt::Debug,
{
    fn node_fmt(&self, f: &mut fmt::Formatter<'_>, index: Index) -> fmt::Result {
        let node = &self.tree.nodes[index];
        let (id, _) = index.into_raw_parts();

        writeln!(
            f,
            r#"    {id} [label="node = {:?} tilt = {}"];"#,
            node.value, node.tilt
        )?;

        if let Some(up) = node.up {
            writeln!(f, r#"    {id} -> {} [label="up"];"#, up.into_raw_parts().0)?;
        }

        for side in [Side::Left, Side::Right] {
            if let Some(child) = node.child(side) {
                writeln!(
                    f,
                    r#"    {id} -> {} [label="{side}"];"#,
                    child.into_raw_parts().0
                )?;
                self.node_fmt(f, child)?;
            }
        }

        Ok(())
    }
}

impl<T, C> fmt::Display for Dot<'_, T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("digraph {\n")?;
        if let Some(root) = self.tree.root {
            self.node_fmt(f, root)?;
        }
        f.write_str("}\n")
    }
}

impl<T, C> fmt::Debug for Dot<'_, T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
