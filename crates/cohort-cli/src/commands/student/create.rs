use cohort_core::entities::NewStudent;
use cohort_core::enums::AdministrativeSituation;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub struct CreateArgs<'a> {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub situation: Option<&'a str>,
}

pub async fn run(
    promotion: &str,
    args: CreateArgs<'_>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let administrative_situation = args
        .situation
        .map(|value| parse_enum::<AdministrativeSituation>(value, "situation"))
        .transpose()?;

    let student = ctx
        .service
        .create_student(
            promotion,
            NewStudent {
                name: args.name,
                email: args.email,
                phone: args.phone,
                administrative_situation,
            },
        )
        .await?;
    output(&student, flags.format)
}
