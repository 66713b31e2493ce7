use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    nawa_lambda_geocoding::run().await
}
