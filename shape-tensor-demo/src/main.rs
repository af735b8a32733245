use shape_tensor::{ParallelConfig, Tensor, Vector, shape, tensor_mul};
use tracing_subscriber::EnvFilter;

fn main() -> shape_tensor::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let v1: Vector<f64, 3> = Tensor::new([1., 2., 3.]);
    let v2: Tensor<f64, shape![3]> = Tensor::new([1., 2., 3.]);

    let r1 = tensor_mul(&v1, &v2);
    let r2 = tensor_mul(&v1, &r1);
    let r3 = r2.outer_par(&r2, &ParallelConfig::default())?;
    let r4 = r1.contract::<0, 1>();
    let r5 = r2.contract::<0, 2>();

    tracing::info!(shape = ?r3.shape(), len = r3.len(), "sixth order product");

    println!("r1 =\n{r1}\n");
    println!("r2 =\n{r2}\n");
    println!("r4 =\n{r4}\n");
    println!("r5 =\n{r5}\n");

    Ok(())
}
