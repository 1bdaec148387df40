//! # Database Command Module / 数据库命令模块
//!
//! Implements `create` and `migrate`: the provisioning task runs once per slot so every
//! execution group finds its own database ready.
//!
//! 实现 `create` 和 `migrate`：准备任务对每个槽位运行一次，使每个执行分组都有自己的数据库。

use anyhow::Result;
use colored::*;

use crate::core::config::SplitterConfig;
use crate::infra::provision::{DbAction, provision_all};
use crate::infra::t;

pub async fn execute(action: DbAction, config: SplitterConfig, locale: &str) -> Result<()> {
    config.validate_provisioning()?;
    println!(
        "{}",
        t!("db.starting", locale = locale, action = action, slots = config.slots).bold()
    );
    provision_all(&config, action, locale).await?;
    println!("{}", t!("db.finished", locale = locale, action = action).green());
    Ok(())
}
