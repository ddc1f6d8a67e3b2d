// 文件浏览器数据类型定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 条目类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    File,
    Directory,
}

/// 目录中的单个条目（文件或文件夹）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSystemEntity {
    /// 条目名称（不含路径，非空）
    pub basename: String,
    /// 条目类型
    #[serde(rename = "type")]
    pub entity_type: EntityType,
}

impl FileSystemEntity {
    pub fn new(basename: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            basename: basename.into(),
            entity_type,
        }
    }

    pub fn file(basename: impl Into<String>) -> Self {
        Self::new(basename, EntityType::File)
    }

    pub fn directory(basename: impl Into<String>) -> Self {
        Self::new(basename, EntityType::Directory)
    }

    pub fn is_file(&self) -> bool {
        self.entity_type == EntityType::File
    }

    pub fn is_directory(&self) -> bool {
        self.entity_type == EntityType::Directory
    }
}

/// 顶层可浏览位置（驱动器盘符或挂载点）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSystemRoot {
    pub identifier: String,
}

impl FileSystemRoot {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

/// 条目过滤谓词
///
/// 返回 true 的条目保留在列表结果中。过滤只排除条目，从不修改条目。
#[derive(Clone)]
pub struct FileFilter(Arc<dyn Fn(&FileSystemEntity) -> bool + Send + Sync>);

impl FileFilter {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&FileSystemEntity) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// 只保留文件
    pub fn files_only() -> Self {
        Self::new(FileSystemEntity::is_file)
    }

    /// 只保留文件夹
    pub fn directories_only() -> Self {
        Self::new(FileSystemEntity::is_directory)
    }

    pub fn matches(&self, entity: &FileSystemEntity) -> bool {
        (self.0)(entity)
    }
}

impl fmt::Debug for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FileFilter(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_wire_format() {
        let entity = FileSystemEntity::directory("games");
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json, serde_json::json!({"basename": "games", "type": "directory"}));

        let parsed: FileSystemEntity =
            serde_json::from_str(r#"{"basename":"b.txt","type":"file"}"#).unwrap();
        assert_eq!(parsed, FileSystemEntity::file("b.txt"));
    }

    #[test]
    fn test_unknown_entity_type_rejected() {
        let parsed = serde_json::from_str::<FileSystemEntity>(r#"{"basename":"x","type":"link"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_root_wire_format() {
        let roots: Vec<FileSystemRoot> =
            serde_json::from_str(r#"[{"identifier":"C:"},{"identifier":"D:"}]"#).unwrap();
        assert_eq!(roots, vec![FileSystemRoot::new("C:"), FileSystemRoot::new("D:")]);
    }

    #[test]
    fn test_filter_helpers() {
        let file = FileSystemEntity::file("rpcs3.exe");
        let dir = FileSystemEntity::directory("dev_hdd0");

        assert!(FileFilter::files_only().matches(&file));
        assert!(!FileFilter::files_only().matches(&dir));
        assert!(FileFilter::directories_only().matches(&dir));

        let by_name = FileFilter::new(|e| e.basename.ends_with(".exe"));
        assert!(by_name.matches(&file));
        assert!(!by_name.matches(&dir));
    }
}
