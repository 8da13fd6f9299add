//! 核心宏定义

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use bone_poser::impl_default;
///
/// struct SliderStep {
///     step: f32,
///     label: String,
/// }
///
/// impl_default!(SliderStep {
///     step: 0.01,
///     label: String::from("x"),
/// });
///
/// assert_eq!(SliderStep::default().step, 0.01);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}
