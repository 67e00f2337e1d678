//! 缓存层
//!
//! 通过注册表提供可插拔的对象缓存后端（Moka/Redis），
//! 后端在各自模块内用 `declare_object_cache_plugin!` 自注册。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个缓存后端
///
/// 生成一个 ctor 函数，在程序启动时把构造器写入注册表。
/// 后端类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let plugin = $plugin::new()
                                .map_err($crate::errors::MLSystemError::cache_connection)?;
                            Ok(Box::new(plugin) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
