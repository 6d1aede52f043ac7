use crate::areas::repository::Repository;
use crate::artifacts::objects::content_id::ContentId;
use std::io::Write;

impl Repository {
    pub fn cat_file(&self, content_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let content_id = ContentId::try_parse(content_id)?;
        let content = self.content_store().get(&content_id)?;

        self.writer().write_all(&content)?;

        Ok(())
    }
}
