use crate::kernel::error::{Result, ShellError};
use crate::kernel::services::ports::{DocumentStore, Prompt};
use crate::kernel::{BatchResult, ExitDecision, TabGroup};

impl<P: Prompt, D: DocumentStore> super::Shell<P, D> {
    /// Closes every tab of every group, all or nothing.
    pub fn close_all(&mut self) -> Result<BatchResult> {
        if !self.validate_all()? {
            tracing::info!("close all canceled");
            return Ok(BatchResult::Canceled);
        }
        self.commit_all()?;
        Ok(BatchResult::Closed)
    }

    /// Shutdown path: the user may veto by canceling any save prompt.
    pub fn request_exit(&mut self) -> Result<ExitDecision> {
        if !self.validate_all()? {
            tracing::info!("exit vetoed");
            return Ok(ExitDecision::Veto);
        }
        self.commit_all()?;
        tracing::info!("exit approved");
        Ok(ExitDecision::Proceed)
    }

    /// Resolves every save decision without detaching anything. Stops at the
    /// first cancel.
    fn validate_all(&mut self) -> Result<bool> {
        for group in self.views.group_ids() {
            let count = self.views.group(group).map_or(0, TabGroup::count);
            for index in 0..count {
                if self.close_tab(group, index, false, false)?.is_canceled() {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Force-closes tab 0 of group 0 until only the replacement blank tab is
    /// left.
    fn commit_all(&mut self) -> Result<()> {
        loop {
            let group = self
                .views
                .group_at(0)
                .map(|g| g.id)
                .ok_or(ShellError::NoGroups)?;

            loop {
                let old_count = self.views.group(group).map_or(0, TabGroup::count);
                if old_count == 0 {
                    self.handle_empty_group(group);
                } else {
                    self.close_tab(group, 0, true, true)?;
                }

                match self.views.group(group).map(TabGroup::count) {
                    // Group destroyed: move on to the next one.
                    None => break,
                    // Last tab removed and a blank one took its place.
                    Some(1) if old_count <= 1 => return Ok(()),
                    Some(_) => {}
                }
            }
        }
    }
}
