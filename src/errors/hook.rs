use crate::definition::BeanName;

#[derive(thiserror::Error, Debug)]
pub enum HookErrorKind {
    #[error("Hook is declared for `{expected}`")]
    IncorrectType { expected: &'static str },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum FinalizeErrorKind {
    #[error("Finalize hook of bean {bean} failed")]
    Hook {
        bean: BeanName,
        #[source]
        source: HookErrorKind,
    },
}
