// 宿主文件系统服务
//
// 为 setup server 提供根目录枚举和目录列表

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::{EnvDetector, OsType};
use crate::explorer::{EntityType, FileSystemEntity, FileSystemRoot};

use super::types::*;

/// 宿主文件系统服务
#[derive(Debug, Clone)]
pub struct FilesystemService {
    config: FilesystemConfig,
    os_type: OsType,
}

impl FilesystemService {
    pub fn new(config: FilesystemConfig) -> Self {
        Self {
            config,
            os_type: EnvDetector::get_os_type(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_os_type(config: FilesystemConfig, os_type: OsType) -> Self {
        Self { config, os_type }
    }

    /// 获取根目录列表（Windows 驱动器列表 / Unix 根目录），再追加配置的额外根目录
    pub fn list_roots(&self) -> Vec<FileSystemRoot> {
        let mut roots = if self.os_type.uses_drive_letters() {
            Self::windows_drives()
        } else {
            vec![FileSystemRoot::new("/")]
        };

        for extra in &self.config.extra_roots {
            if roots.iter().any(|r| &r.identifier == extra) {
                continue;
            }
            if Path::new(extra).is_dir() {
                roots.push(FileSystemRoot::new(extra.clone()));
            } else {
                tracing::warn!("配置的额外根目录不存在，已忽略: {}", extra);
            }
        }

        roots
    }

    /// 遍历 A-Z，返回存在的驱动器（如 "C:"）
    fn windows_drives() -> Vec<FileSystemRoot> {
        ('A'..='Z')
            .filter(|letter| Path::new(&format!("{}:\\", letter)).exists())
            .map(|letter| FileSystemRoot::new(format!("{}:", letter)))
            .collect()
    }

    /// 列出目录的直接子条目
    ///
    /// 文件夹排在前面，同类按名称（忽略大小写）排序
    pub fn list_directory(&self, directory: &str) -> Result<Vec<FileSystemEntity>, FsError> {
        let path = self.resolve(directory)?;

        let metadata = fs::metadata(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                FsError::new(FsErrorCode::DirectoryNotFound).with_path(directory)
            }
            ErrorKind::PermissionDenied => {
                FsError::new(FsErrorCode::PermissionDenied).with_path(directory)
            }
            _ => FsError::new(FsErrorCode::DirectoryReadFailed)
                .with_path(directory)
                .with_message(format!("读取目录失败: {}", e)),
        })?;

        if !metadata.is_dir() {
            return Err(FsError::new(FsErrorCode::NotADirectory).with_path(directory));
        }

        let read_dir = fs::read_dir(&path).map_err(|e| {
            tracing::error!("读取目录失败: {:?}, 错误: {}", path, e);
            let code = if e.kind() == ErrorKind::PermissionDenied {
                FsErrorCode::PermissionDenied
            } else {
                FsErrorCode::DirectoryReadFailed
            };
            FsError::new(code)
                .with_path(directory)
                .with_message(format!("读取目录失败: {}", e))
        })?;

        let mut entities: Vec<FileSystemEntity> = read_dir
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if name.is_empty() || (!self.config.show_hidden && is_hidden(&name)) {
                    return None;
                }

                // is_dir 会跟随符号链接
                let entity_type = if entry.path().is_dir() {
                    EntityType::Directory
                } else {
                    EntityType::File
                };
                Some(FileSystemEntity::new(name, entity_type))
            })
            .collect();

        sort_entities(&mut entities);
        tracing::debug!("列出目录 {:?}: {} 个条目", path, entities.len());

        Ok(entities)
    }

    /// 将请求中的目录转换为本地路径
    fn resolve(&self, directory: &str) -> Result<PathBuf, FsError> {
        let trimmed = directory.trim();
        if trimmed.is_empty() {
            return Err(FsError::new(FsErrorCode::InvalidPathFormat).with_message("目录不能为空"));
        }

        // Windows 上 "C:" 表示驱动器的当前目录，需要补上分隔符才是根目录
        if self.os_type.uses_drive_letters()
            && trimmed.len() == 2
            && trimmed.ends_with(':')
            && trimmed.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        {
            return Ok(PathBuf::from(format!("{}\\", trimmed)));
        }

        Ok(PathBuf::from(trimmed))
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn sort_entities(entities: &mut [FileSystemEntity]) {
    entities.sort_by(|a, b| match (a.entity_type, b.entity_type) {
        (EntityType::Directory, EntityType::File) => std::cmp::Ordering::Less,
        (EntityType::File, EntityType::Directory) => std::cmp::Ordering::Greater,
        _ => a.basename.to_lowercase().cmp(&b.basename.to_lowercase()),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Saves")).unwrap();
        fs::create_dir(dir.path().join("dev_hdd0")).unwrap();
        fs::write(dir.path().join("rpcs3.exe"), b"").unwrap();
        fs::write(dir.path().join("Games.yml"), b"").unwrap();
        fs::write(dir.path().join(".hidden"), b"").unwrap();
        dir
    }

    #[test]
    fn test_resolve_drive_letter_root() {
        let windows = FilesystemService::with_os_type(FilesystemConfig::default(), OsType::Windows);
        assert_eq!(windows.resolve("C:").unwrap(), PathBuf::from("C:\\"));
        assert_eq!(windows.resolve(" d: ").unwrap(), PathBuf::from("d:\\"));
        assert_eq!(
            windows.resolve("C:\\Games").unwrap(),
            PathBuf::from("C:\\Games")
        );
        assert_eq!(windows.resolve("1:").unwrap(), PathBuf::from("1:"));

        // 非 Windows 平台不做盘符补全
        let linux = FilesystemService::with_os_type(FilesystemConfig::default(), OsType::Linux);
        assert_eq!(linux.resolve("C:").unwrap(), PathBuf::from("C:"));
        assert_eq!(linux.resolve("/tmp").unwrap(), PathBuf::from("/tmp"));

        let err = windows.resolve("  ").unwrap_err();
        assert_eq!(err.code, FsErrorCode::InvalidPathFormat);
    }

    #[test]
    fn test_list_roots() {
        let service = FilesystemService::new(FilesystemConfig::default());
        let roots = service.list_roots();

        #[cfg(target_os = "windows")]
        assert!(roots.iter().all(|r| r.identifier.ends_with(':')));

        #[cfg(not(target_os = "windows"))]
        assert_eq!(roots, vec![FileSystemRoot::new("/")]);
    }

    #[test]
    fn test_list_roots_with_extra() {
        let dir = TempDir::new().unwrap();
        let extra = dir.path().to_string_lossy().to_string();
        let service = FilesystemService::new(FilesystemConfig {
            show_hidden: false,
            extra_roots: vec![extra.clone(), "/definitely/not/here".to_string()],
        });

        let roots = service.list_roots();
        assert_eq!(roots.last(), Some(&FileSystemRoot::new(extra)));
        assert!(!roots.iter().any(|r| r.identifier == "/definitely/not/here"));
    }

    #[test]
    fn test_list_directory_sorted_and_hidden_skipped() {
        let dir = fixture();
        let service = FilesystemService::new(FilesystemConfig::default());

        let entities = service
            .list_directory(dir.path().to_str().unwrap())
            .unwrap();
        assert_eq!(
            entities,
            vec![
                FileSystemEntity::directory("dev_hdd0"),
                FileSystemEntity::directory("Saves"),
                FileSystemEntity::file("Games.yml"),
                FileSystemEntity::file("rpcs3.exe"),
            ]
        );
    }

    #[test]
    fn test_list_directory_show_hidden() {
        let dir = fixture();
        let service = FilesystemService::new(FilesystemConfig {
            show_hidden: true,
            extra_roots: vec![],
        });

        let entities = service
            .list_directory(dir.path().to_str().unwrap())
            .unwrap();
        assert!(entities.contains(&FileSystemEntity::file(".hidden")));
        assert_eq!(entities.len(), 5);
    }

    #[test]
    fn test_list_directory_errors() {
        let dir = fixture();
        let service = FilesystemService::new(FilesystemConfig::default());

        let missing = dir.path().join("missing");
        let err = service
            .list_directory(missing.to_str().unwrap())
            .unwrap_err();
        assert_eq!(err.code, FsErrorCode::DirectoryNotFound);

        let file = dir.path().join("rpcs3.exe");
        let err = service.list_directory(file.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code, FsErrorCode::NotADirectory);

        let err = service.list_directory("  ").unwrap_err();
        assert_eq!(err.code, FsErrorCode::InvalidPathFormat);
    }
}
