//! 背景執行
//!
//! 每次整理在獨立執行緒上執行，完成後透過單一通道回報一次結果。
//! 多個不同的資料夾可以同時整理；同一個資料夾不會被同時整理兩次

use super::organizer::{OrganizeReport, Organizer};
use anyhow::{Context, Result, anyhow};
use crossbeam_channel::{Receiver, bounded};
use log::{info, warn};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

/// 背景整理的控制代碼
pub struct OrganizeHandle {
    root: PathBuf,
    receiver: Receiver<Result<OrganizeReport>>,
    worker: Option<JoinHandle<()>>,
}

impl OrganizeHandle {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// 等待整理結束並取得結果
    pub fn wait(mut self) -> Result<OrganizeReport> {
        let result = self.receiver.recv();

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("整理執行緒異常結束: {}", self.root.display());
            }
        }

        result.unwrap_or_else(|_| {
            Err(anyhow!(
                "整理執行緒沒有回傳結果: {}",
                self.root.display()
            ))
        })
    }
}

/// 在背景執行緒整理資料夾
pub fn spawn_organize(root: PathBuf, mut organizer: Organizer) -> Result<OrganizeHandle> {
    let (sender, receiver) = bounded(1);
    let worker_root = root.clone();

    let worker = thread::Builder::new()
        .name("photo-organize".to_string())
        .spawn(move || {
            let result = organizer.run(&worker_root);
            // 呼叫端已放棄結果時直接丟棄
            let _ = sender.send(result);
        })
        .context("無法建立整理執行緒")?;

    Ok(OrganizeHandle {
        root,
        receiver,
        worker: Some(worker),
    })
}

/// 單一資料夾的整理結果
#[derive(Debug)]
pub struct RootOutcome {
    pub root: PathBuf,
    pub result: Result<OrganizeReport>,
}

/// 平行整理多個資料夾
///
/// 指向同一個資料夾的重複路徑只會整理第一個，其餘回傳錯誤
pub fn organize_roots(roots: &[PathBuf], organizer: &Organizer) -> Vec<RootOutcome> {
    let mut seen = HashSet::new();
    let plan: Vec<(PathBuf, bool)> = roots
        .iter()
        .map(|root| {
            let key = fs::canonicalize(root).unwrap_or_else(|_| root.clone());
            (root.clone(), seen.insert(key))
        })
        .collect();

    info!("開始整理 {} 個資料夾", plan.len());

    plan.into_par_iter()
        .map(|(root, is_unique)| {
            let result = if is_unique {
                organizer.clone().run(&root)
            } else {
                Err(anyhow!("重複的資料夾，已略過: {}", root.display()))
            };
            RootOutcome { root, result }
        })
        .collect()
}
