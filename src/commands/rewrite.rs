use crate::core::{error::Result, path_rewriter::rewrite, print_info, RouteRefDescriptor};

/// Print the path to navigate to after switching ref, or a notice that the
/// current route should be left alone.
pub fn execute_rewrite(descriptor: RouteRefDescriptor) -> Result<()> {
    match rewrite(&descriptor) {
        Some(rewrite) => {
            log::debug!("{} strategy applied", rewrite.strategy);
            println!("{}", rewrite.path);
        }
        None => print_info("No redirect"),
    }
    Ok(())
}
