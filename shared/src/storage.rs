//! 客户端本地键值存储抽象
//!
//! 浏览器中由 `localStorage` 实现；`MemoryStore` 用于测试以及非浏览器环境。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 本地键值存储
///
/// 与 `localStorage` 一致：读取失败视为不存在，写入/删除返回是否成功。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 内存实现，克隆出的实例共享同一份数据
#[derive(Clone, Default, Debug)]
pub struct MemoryStore {
    data: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.data.borrow_mut().remove(key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v");
        assert_eq!(other.get("k").as_deref(), Some("v"));
        assert!(other.delete("k"));
        assert!(store.is_empty());
    }
}
