use crate::cli::{ConfirmedTarget, TeamTarget};
use crate::client::AdminClient;
use crate::error::Result;

pub async fn verify(client: AdminClient, target: TeamTarget) -> Result<()> {
    let mut console = super::located(client, &target, false).await?;
    super::finish(console.verify_payment(target.id).await)
}

pub async fn reject(client: AdminClient, args: ConfirmedTarget) -> Result<()> {
    let mut console = super::located(client, &args.target, args.yes).await?;
    super::finish(console.reject_payment(args.target.id).await)
}
