use clap::Args;
use shopfront_app::{
    database::{self, Db},
    domain::orders::{OrdersService, PgOrdersService, records::OrderUuid},
    money::{Amount, Discount},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct DiscountArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Order UUID to update
    #[arg(long)]
    order_uuid: Uuid,

    /// Discount percentage; omit to clear the discount
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    percent: Option<u8>,
}

pub(crate) async fn run(args: DiscountArgs) -> Result<(), String> {
    let discount = args
        .percent
        .map(Discount::new)
        .transpose()
        .map_err(|error| error.to_string())?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgOrdersService::new(Db::new(pool));

    let order = service
        .set_discount(OrderUuid::from_uuid(args.order_uuid), discount)
        .await
        .map_err(|error| format!("failed to set discount: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!(
        "discount: {}",
        order
            .discount
            .map_or_else(|| "none".to_string(), |d| format!("{}%", d.percent()))
    );
    println!("price: {}", Amount(order.price()));
    println!("total_price: {}", Amount(order.total_price()));

    Ok(())
}
