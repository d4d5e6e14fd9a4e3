//! 对象缓存层
//!
//! 缓存后端以插件形式注册（见 [`register`]），启动时按配置的 `cache.type` 选择。
//! 目前用于缓存 JWT 对应的用户信息，避免每个请求都查询数据库。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明一个缓存插件，并在程序加载时自动注册到插件表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        fn __object_cache_constructor() -> $crate::cache::register::BoxedObjectCacheFuture {
            Box::pin(async {
                match <$ty>::new() {
                    Ok(cache) => Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>),
                    Err(e) => Err($crate::errors::SchoolHubError::cache_connection(e)),
                }
            })
        }

        #[ctor::ctor(unsafe)]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(__object_cache_constructor),
            );
        }
    };
}
